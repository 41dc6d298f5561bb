//! Metadata describing the deployed detection model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::class::SafetyClass;

/// Version string reported with every detection response.
pub const MODEL_VERSION: &str = "YOLOv8n-space-v1.0";

/// Nominal `[width, height]` the model was trained on.
pub const MODEL_INPUT_SIZE: [u32; 2] = [640, 640];

const MODEL_TYPE: &str = "Object Detection";
const FRAMEWORK: &str = "YOLOv8";
const DESCRIPTION: &str = "Specialized model for detecting space station safety equipment";

/// Response body of `GET /api/model-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModelInfo {
    pub model_name: String,
    pub model_type: String,
    pub framework: String,
    pub classes: Vec<String>,
    pub input_size: [u32; 2],
    pub description: String,
}

impl ModelInfo {
    /// Metadata of the model currently served.
    pub fn current() -> Self {
        Self {
            model_name: MODEL_VERSION.to_string(),
            model_type: MODEL_TYPE.to_string(),
            framework: FRAMEWORK.to_string(),
            classes: SafetyClass::labels().into_iter().map(String::from).collect(),
            input_size: MODEL_INPUT_SIZE,
            description: DESCRIPTION.to_string(),
        }
    }
}
