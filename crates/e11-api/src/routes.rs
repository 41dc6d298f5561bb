//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::handlers::{detect, health, index, model_info};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Prefix shared by every public endpoint.
pub const API_PREFIX: &str = "/api";

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let api_routes = Router::new()
        .route("/detect", post(detect))
        .route("/health", get(health))
        .route("/model-info", get(model_info));

    // Index is reachable with and without the trailing slash
    let index_routes = Router::new()
        .route(API_PREFIX, get(index))
        .route(&format!("{API_PREFIX}/"), get(index));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest(API_PREFIX, api_routes)
        .merge(index_routes)
        .merge(metrics_routes)
        // Enforced by the multipart extractor so oversize uploads get a JSON 413
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_logging))
        .layer(middleware::from_fn(request_id))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
