//! # Roster
//!
//! A directory search service over two related entities: persons and the
//! groups they belong to. A caller describes an optional, partially
//! specified search and receives a paginated, joined result set without a
//! bespoke query per filter combination.
//!
//! ## How a search runs
//!
//! 1. A [`SearchCondition`](core::SearchCondition) carries four
//!    independently optional filters. Each present filter becomes one
//!    [`Predicate`](core::Predicate) fragment; absent or blank filters are
//!    structurally omitted, never turned into always-true comparisons.
//! 2. The [`SearchExecutor`](query::SearchExecutor) hands the fragments to
//!    a [`Datastore`](core::Datastore), which left-joins persons to groups
//!    (a groupless person is still a row), filters conjunctively, sorts,
//!    and windows to the requested page.
//! 3. One of two [`PagePlanner`](query::PagePlanner) strategies produces
//!    the total: [`SimplePlanner`](query::SimplePlanner) always runs a
//!    count query alongside the fetch, while
//!    [`ComplexPlanner`](query::ComplexPlanner) skips the count whenever a
//!    short page already proves the total.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use roster::prelude::*;
//!
//! let store = Arc::new(InMemoryDatastore::new());
//! fixture::load_path(store.as_ref(), "fixtures/roster.yaml").await?;
//!
//! let executor = SearchExecutor::new(store.clone());
//! let planner = ComplexPlanner::new(executor);
//!
//! let condition = SearchCondition::any().with_min_age(15);
//! let request = PageRequest::new(0, 10)?;
//! let page = planner.search_page(&condition, &request).await?;
//! ```

pub mod config;
pub mod core;
pub mod fixture;
pub mod query;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core types ===
    pub use crate::core::{
        condition::SearchCondition,
        entity::{Group, Person, PersonGroupRow},
        error::{PageRequestError, QueryError, RosterError, RosterResult, StorageError},
        page::{PageMeta, PageRequest, PageResult, SortDirection, SortField, SortSpec},
        predicate::Predicate,
        service::Datastore,
    };

    // === Query layer ===
    pub use crate::query::{ComplexPlanner, PagePlanner, SearchExecutor, SimplePlanner};

    // === Storage ===
    pub use crate::storage::InMemoryDatastore;

    // === Config ===
    pub use crate::config::ServerConfig;

    // === Server ===
    pub use crate::server::{AppState, build_router};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
