//! rosterd: directory search service over persons and groups

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use roster::config::ServerConfig;
use roster::fixture;
use roster::server::{AppState, build_router};
use roster::storage::InMemoryDatastore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match std::env::var("ROSTER_CONFIG") {
        Ok(path) => ServerConfig::from_yaml_file(&path)
            .with_context(|| format!("loading config from {}", path))?,
        Err(_) => ServerConfig::default(),
    };

    let store = Arc::new(InMemoryDatastore::new());
    if let Some(path) = &config.fixture_file {
        let summary = fixture::load_path(store.as_ref(), path)
            .await
            .with_context(|| format!("loading fixture from {}", path))?;
        tracing::info!(
            persons = summary.persons,
            groups = summary.groups,
            path = %path,
            "dataset imported"
        );
    } else {
        tracing::warn!("no fixture_file configured, serving an empty dataset");
    }

    let state = AppState::new(store, &config);
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(%addr, "roster service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown handler");
    }
}
