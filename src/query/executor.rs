//! Query execution over the joined person/group dataset

use std::sync::Arc;

use crate::core::condition::SearchCondition;
use crate::core::entity::PersonGroupRow;
use crate::core::error::QueryError;
use crate::core::page::PageRequest;
use crate::core::service::Datastore;

/// Executes searches against a datastore.
///
/// The executor is the single place where a [`SearchCondition`] is turned
/// into predicate fragments and handed to the dataset access layer: the
/// bounded fetch joins, filters, projects and windows, and never counts.
/// The separate [`count`](SearchExecutor::count) operation exists for the
/// page planners, which alone decide whether and when a total is queried.
#[derive(Clone)]
pub struct SearchExecutor {
    store: Arc<dyn Datastore>,
}

impl SearchExecutor {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self { store }
    }

    /// Fetch one page of rows matching the condition.
    ///
    /// Returns at most `request.size()` rows, starting at
    /// `request.index() * request.size()`, ordered by the request's sort
    /// (person id ascending when unspecified). A person without a group is
    /// included with the group fields absent.
    pub async fn fetch_page(
        &self,
        condition: &SearchCondition,
        request: &PageRequest,
    ) -> Result<Vec<PersonGroupRow>, QueryError> {
        let predicates = condition.predicates();
        tracing::debug!(
            fragments = predicates.len(),
            index = request.index(),
            size = request.size(),
            "executing bounded fetch"
        );

        self.store
            .fetch_joined(&predicates, request.sort(), request.offset(), request.size())
            .await
    }

    /// Count all rows matching the condition, without paging.
    pub async fn count(&self, condition: &SearchCondition) -> Result<u64, QueryError> {
        let predicates = condition.predicates();
        tracing::debug!(fragments = predicates.len(), "executing count query");

        self.store.count(&predicates).await
    }
}
