//! HTTP server: shared state and routing

pub mod handlers;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::core::service::Datastore;
use crate::query::executor::SearchExecutor;
use crate::query::planner::{ComplexPlanner, PagePlanner, SimplePlanner};

use handlers::{healthz, search_persons_complex, search_persons_simple};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Datastore>,
    pub simple: Arc<dyn PagePlanner>,
    pub complex: Arc<dyn PagePlanner>,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl AppState {
    /// Wire both planners over the given datastore
    pub fn new(store: Arc<dyn Datastore>, config: &ServerConfig) -> Self {
        let executor = SearchExecutor::new(store.clone());
        Self {
            store,
            simple: Arc::new(SimplePlanner::new(executor.clone())),
            complex: Arc::new(ComplexPlanner::new(executor)),
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        }
    }
}

/// Build the service router
///
/// - GET /v2/persons: search, always-counting strategy
/// - GET /v3/persons: search, count-eliding strategy
/// - GET /healthz: liveness probe
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v2/persons", get(search_persons_simple))
        .route("/v3/persons", get(search_persons_complex))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
