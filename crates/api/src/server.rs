//! REST HTTP server.

use std::future::Future;
use std::sync::Arc;

use axum::{Router, routing::get};
use tracing::{debug, info};

use radar_core::ports::Repositories;

use crate::routes::{clobs, levels, locations, offices, ratings, timeseries};

/// Shared handler state: the repository set behind the port traits.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn Repositories>,
}

impl AppState {
    pub fn new(repos: Arc<dyn Repositories>) -> Self {
        Self { repos }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7000,
        }
    }
}

/// Build the full route table.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/offices", get(offices::list_offices))
        .route("/offices/:office", get(offices::get_office))
        .route(
            "/locations",
            get(locations::list_locations).post(locations::create_location),
        )
        .route(
            "/locations/:name",
            get(locations::get_location).delete(locations::delete_location),
        )
        .route("/catalog/timeseries", get(timeseries::list_catalog))
        .route("/timeseries", get(timeseries::get_timeseries))
        .route("/ratings/specs", get(ratings::list_rating_specs))
        .route("/ratings/specs/:rating_id", get(ratings::get_rating_spec))
        .route("/levels", get(levels::list_levels))
        .route("/clobs", get(clobs::list_clobs).post(clobs::create_clob))
        .route(
            "/clobs/:id",
            get(clobs::get_clob).delete(clobs::delete_clob),
        )
        .route("/health", get(health_check))
        .with_state(state)
}

/// Start the REST server.
pub async fn serve(state: AppState, config: ServerConfig) -> Result<(), std::io::Error> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("⚡ REST server listening on http://{}", addr);

    axum::serve(listener, app).await
}

/// Start the REST server with graceful shutdown support.
pub async fn serve_with_shutdown<F>(
    state: AppState,
    config: ServerConfig,
    shutdown_signal: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    debug!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
