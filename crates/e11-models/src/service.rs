//! Service identity payloads for the health and index endpoints.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "Eleven11 Detection API";

/// Title reported by the index endpoint.
pub const SERVICE_TITLE: &str = "Eleven11 Space Safety Detection API";

/// Public API version.
pub const SERVICE_VERSION: &str = "1.0.0";

/// Health response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
        }
    }
}

/// Index response listing the logical endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceIndex {
    pub message: String,
    pub version: String,
    /// Logical endpoint name to path
    pub endpoints: BTreeMap<String, String>,
}

impl ServiceIndex {
    /// Build the index for routes mounted under `prefix` (e.g. `/api`).
    pub fn new(prefix: &str) -> Self {
        let endpoints = [
            ("detection", "/detect"),
            ("health", "/health"),
            ("model_info", "/model-info"),
        ]
        .into_iter()
        .map(|(name, path)| (name.to_string(), format!("{prefix}{path}")))
        .collect();

        Self {
            message: SERVICE_TITLE.to_string(),
            version: SERVICE_VERSION.to_string(),
            endpoints,
        }
    }
}
