//! Read-only metadata handlers.

use axum::Json;
use e11_models::{ModelInfo, ServiceIndex};

use crate::routes::API_PREFIX;

/// Metadata of the served detection model.
pub async fn model_info() -> Json<ModelInfo> {
    Json(ModelInfo::current())
}

/// Service name, version and endpoint map.
pub async fn index() -> Json<ServiceIndex> {
    Json(ServiceIndex::new(API_PREFIX))
}
