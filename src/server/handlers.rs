//! HTTP handlers for the search endpoints

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::core::condition::SearchCondition;
use crate::core::entity::PersonGroupRow;
use crate::core::error::RosterError;
use crate::core::page::{PageRequest, PageResult, SortSpec};
use crate::query::planner::PagePlanner;
use crate::server::AppState;

/// Query parameters accepted by the search endpoints.
///
/// Every filter is independently optional; paging parameters default from
/// the server configuration. `page` and `size` bind as signed integers so
/// out-of-range values reach the validating constructor instead of failing
/// opaquely at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub name: Option<String>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub group_name: Option<String>,

    /// Zero-based page index
    pub page: Option<i64>,

    /// Rows per page
    pub size: Option<i64>,

    /// Sort expression, `field[:asc|desc]`
    pub sort: Option<String>,
}

impl SearchParams {
    fn condition(&self) -> SearchCondition {
        SearchCondition {
            name: self.name.clone(),
            min_age: self.min_age,
            max_age: self.max_age,
            group_name: self.group_name.clone(),
        }
    }

    /// Validate the paging parameters against the configured limits.
    ///
    /// Missing values take the configured default; an oversized page is
    /// capped at the configured maximum. Non-positive sizes and negative
    /// indices are rejected, never corrected.
    fn page_request(&self, state: &AppState) -> Result<PageRequest, RosterError> {
        let size = match self.size {
            Some(size) if size > 0 => size.min(state.max_page_size as i64),
            Some(size) => size,
            None => state.default_page_size as i64,
        };
        let mut request = PageRequest::new(self.page.unwrap_or(0), size)?;

        if let Some(sort) = self.sort.as_deref() {
            request = request.with_sort(sort.parse::<SortSpec>()?);
        }
        Ok(request)
    }
}

async fn run_search(
    planner: &dyn PagePlanner,
    state: &AppState,
    params: &SearchParams,
) -> Result<Json<PageResult<PersonGroupRow>>, RosterError> {
    let request = params.page_request(state)?;
    let condition = params.condition();

    let page = planner.search_page(&condition, &request).await?;
    Ok(Json(page))
}

/// GET /v2/persons: search with the always-counting strategy
pub async fn search_persons_simple(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PageResult<PersonGroupRow>>, RosterError> {
    run_search(state.simple.as_ref(), &state, &params).await
}

/// GET /v3/persons: search with the count-eliding strategy
pub async fn search_persons_complex(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PageResult<PersonGroupRow>>, RosterError> {
    run_search(state.complex.as_ref(), &state, &params).await
}

/// GET /healthz: liveness probe with dataset counts
pub async fn healthz(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, RosterError> {
    let (persons, groups) = state.store.counts().await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "persons": persons,
        "groups": groups,
    })))
}
