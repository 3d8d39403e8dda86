//! Page planners: the two strategies for producing a paginated result
//!
//! Both planners run the same bounded fetch through the executor; they
//! differ only in how the total element count is obtained. [`SimplePlanner`]
//! always runs a count query. [`ComplexPlanner`] skips it whenever the
//! fetched page's shape already proves the total.

use async_trait::async_trait;

use crate::core::condition::SearchCondition;
use crate::core::entity::PersonGroupRow;
use crate::core::error::QueryError;
use crate::core::page::{PageRequest, PageResult};
use crate::query::executor::SearchExecutor;

/// A strategy for answering one paginated search request.
///
/// Implementations are stateless over request-scoped input and safe to
/// share across concurrent requests.
#[async_trait]
pub trait PagePlanner: Send + Sync {
    /// Execute the search and assemble one page of results
    async fn search_page(
        &self,
        condition: &SearchCondition,
        request: &PageRequest,
    ) -> Result<PageResult<PersonGroupRow>, QueryError>;
}

/// Correctness-first baseline: every request costs one fetch plus one
/// unconditional count, so the total is always exact.
pub struct SimplePlanner {
    executor: SearchExecutor,
}

impl SimplePlanner {
    pub fn new(executor: SearchExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl PagePlanner for SimplePlanner {
    async fn search_page(
        &self,
        condition: &SearchCondition,
        request: &PageRequest,
    ) -> Result<PageResult<PersonGroupRow>, QueryError> {
        // The fetch and the count have no ordering dependency, so they run
        // concurrently. If either fails the request fails whole; a page is
        // never returned with a missing or defaulted total.
        let (rows, total) = tokio::try_join!(
            self.executor.fetch_page(condition, request),
            self.executor.count(condition),
        )?;

        Ok(PageResult::assemble(rows, request, total))
    }
}

/// Count-eliding strategy: runs the bounded fetch first and infers the
/// total when the page's shape proves it, falling back to the same count
/// query as [`SimplePlanner`] otherwise.
pub struct ComplexPlanner {
    executor: SearchExecutor,
}

impl ComplexPlanner {
    pub fn new(executor: SearchExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl PagePlanner for ComplexPlanner {
    async fn search_page(
        &self,
        condition: &SearchCondition,
        request: &PageRequest,
    ) -> Result<PageResult<PersonGroupRow>, QueryError> {
        let rows = self.executor.fetch_page(condition, request).await?;
        let fetched = rows.len();

        // A short first page holds the entire result set. A short non-empty
        // page anywhere else is the final page, so the total is exactly the
        // offset plus what it holds. Everything else proves nothing: a full
        // page may have rows beyond it, and an empty page past the first
        // only shows the offset overshot the end. Those take the real count.
        let total = if request.index() == 0 && fetched < request.size() {
            tracing::debug!(fetched, "count elided: short first page");
            fetched as u64
        } else if fetched > 0 && fetched < request.size() {
            tracing::debug!(
                fetched,
                offset = request.offset(),
                "count elided: short final page"
            );
            (request.offset() + fetched) as u64
        } else {
            self.executor.count(condition).await?
        };

        Ok(PageResult::assemble(rows, request, total))
    }
}
