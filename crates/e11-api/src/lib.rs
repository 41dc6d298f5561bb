//! Axum HTTP API server.
//!
//! This crate provides:
//! - `POST /api/detect` multipart image upload returning detections
//! - Health, model-info and index endpoints
//! - Request IDs, request logging and CORS
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::{create_router, API_PREFIX};
pub use services::DetectionService;
pub use state::AppState;
