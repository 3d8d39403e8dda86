//! Page requests, sorting, and paginated results

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::PageRequestError;

/// Field a result set can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    Age,
    GroupName,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A sort specification: field plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl FromStr for SortSpec {
    type Err = PageRequestError;

    /// Parse the `field:asc` / `field:desc` query format; a bare field name
    /// sorts ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field, direction),
            None => (s, "asc"),
        };

        let field = match field {
            "id" => SortField::Id,
            "name" => SortField::Name,
            "age" => SortField::Age,
            "group_name" => SortField::GroupName,
            _ => {
                return Err(PageRequestError::InvalidSort {
                    value: s.to_string(),
                });
            }
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => {
                return Err(PageRequestError::InvalidSort {
                    value: s.to_string(),
                });
            }
        };

        Ok(SortSpec::new(field, direction))
    }
}

/// A validated request for one page of results.
///
/// Page indices are zero-based; the page size is a positive row count.
/// Construction validates both bounds up front so no query is ever issued
/// for an invalid request; out-of-range values are rejected, never clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    index: usize,
    size: usize,
    sort: Option<SortSpec>,
}

impl PageRequest {
    /// Validate and build a page request.
    ///
    /// Inputs are signed so that negative values arriving from the outside
    /// world are representable here and rejected explicitly.
    pub fn new(index: i64, size: i64) -> Result<Self, PageRequestError> {
        if size <= 0 {
            return Err(PageRequestError::NonPositiveSize { size });
        }
        if index < 0 {
            return Err(PageRequestError::NegativeIndex { index });
        }

        Ok(Self {
            index: index as usize,
            size: size as usize,
            sort: None,
        })
    }

    /// Attach a sort specification
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Zero-based page index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Maximum number of rows in the page
    pub fn size(&self) -> usize {
        self.size
    }

    /// Requested ordering, if any
    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Number of rows to skip before this page begins
    pub fn offset(&self) -> usize {
        self.index * self.size
    }
}

/// Metadata describing a page within the whole result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Zero-based page index
    pub index: usize,

    /// Requested page size
    pub size: usize,

    /// Total matching rows across all pages (exact or inferred)
    pub total_elements: u64,

    /// Number of pages needed for all matching rows
    pub total_pages: u64,

    /// Whether this page is the last one
    pub last: bool,
}

/// One page of results plus its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub content: Vec<T>,
    pub page: PageMeta,
}

impl<T> PageResult<T> {
    /// Combine fetched rows, the request, and a total into a page result.
    ///
    /// Rows are kept in fetch order. The total is clamped up to at least the
    /// number of rows actually returned, so the metadata can never
    /// contradict the content in front of it.
    pub fn assemble(rows: Vec<T>, request: &PageRequest, total: u64) -> Self {
        let total = total.max(rows.len() as u64);
        let size = request.size() as u64;
        let total_pages = if total == 0 { 0 } else { total.div_ceil(size) };
        let last = request.offset() as u64 + rows.len() as u64 >= total;

        Self {
            content: rows,
            page: PageMeta {
                index: request.index(),
                size: request.size(),
                total_elements: total,
                total_pages,
                last,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_size() {
        assert!(matches!(
            PageRequest::new(0, 0),
            Err(PageRequestError::NonPositiveSize { size: 0 })
        ));
        assert!(matches!(
            PageRequest::new(0, -3),
            Err(PageRequestError::NonPositiveSize { size: -3 })
        ));
    }

    #[test]
    fn test_rejects_negative_index() {
        assert!(matches!(
            PageRequest::new(-1, 10),
            Err(PageRequestError::NegativeIndex { index: -1 })
        ));
    }

    #[test]
    fn test_offset_is_index_times_size() {
        let request = PageRequest::new(3, 10).unwrap();
        assert_eq!(request.offset(), 30);
        assert_eq!(PageRequest::new(0, 25).unwrap().offset(), 0);
    }

    #[test]
    fn test_sort_spec_parsing() {
        assert_eq!(
            "age:desc".parse::<SortSpec>().unwrap(),
            SortSpec::new(SortField::Age, SortDirection::Desc)
        );
        assert_eq!(
            "name".parse::<SortSpec>().unwrap(),
            SortSpec::new(SortField::Name, SortDirection::Asc)
        );
        assert_eq!(
            "group_name:asc".parse::<SortSpec>().unwrap(),
            SortSpec::new(SortField::GroupName, SortDirection::Asc)
        );
        assert!("height:asc".parse::<SortSpec>().is_err());
        assert!("age:sideways".parse::<SortSpec>().is_err());
    }

    #[test]
    fn test_assemble_keeps_fetch_order() {
        let request = PageRequest::new(0, 10).unwrap();
        let page = PageResult::assemble(vec![3, 1, 2], &request, 3);
        assert_eq!(page.content, vec![3, 1, 2]);
    }

    #[test]
    fn test_assemble_page_math() {
        let request = PageRequest::new(1, 10).unwrap();
        let page = PageResult::assemble(vec![0u8; 10], &request, 25);
        assert_eq!(page.page.total_elements, 25);
        assert_eq!(page.page.total_pages, 3);
        assert!(!page.page.last);

        let request = PageRequest::new(2, 10).unwrap();
        let page = PageResult::assemble(vec![0u8; 5], &request, 25);
        assert!(page.page.last);
    }

    #[test]
    fn test_assemble_empty_result() {
        let request = PageRequest::new(0, 10).unwrap();
        let page = PageResult::<u8>::assemble(vec![], &request, 0);
        assert_eq!(page.page.total_elements, 0);
        assert_eq!(page.page.total_pages, 0);
        assert!(page.page.last);
    }

    #[test]
    fn test_assemble_clamps_total_to_row_count() {
        let request = PageRequest::new(0, 10).unwrap();
        let page = PageResult::assemble(vec![0u8; 4], &request, 2);
        assert_eq!(page.page.total_elements, 4);
    }
}
