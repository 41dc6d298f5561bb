//! Health check handler.

use axum::Json;
use e11_models::HealthResponse;

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
