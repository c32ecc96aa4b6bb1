pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod log;
pub mod providers;
pub mod rates;
pub mod routes;
pub mod state;

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::core::currency::RateProvider;
use crate::providers::FrankfurterProvider;
use crate::rates::RateStore;
use crate::state::AppState;

/// Builds the application router for the given state.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::api_router())
        .route("/health", axum::routing::get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

pub async fn run(config_path: Option<&str>) -> Result<()> {
    info!("vibe-commerce starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let data_dir = config.data_path()?;
    let db = db::DocumentStore::open(&data_dir)?;

    // Shared rate cache behind the provider; handlers only see the trait.
    let rate_store = Arc::new(RateStore::new());
    let provider = FrankfurterProvider::new(&config.rates.base_url, rate_store)
        .with_ttl(config.rates.ttl());
    let rates: Arc<dyn RateProvider> = Arc::new(provider);

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .context("invalid bind address")?;

    let state = AppState::new(config, db, rates);
    let app = app(state);

    info!("vibe-commerce listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    info!("Shutdown signal received, gracefully stopping...");
}
