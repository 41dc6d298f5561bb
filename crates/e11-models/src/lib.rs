//! Shared data models for the Eleven11 detection service.
//!
//! This crate provides Serde-serializable types for:
//! - Detections, bounding boxes and the detection response envelope
//! - The closed safety-equipment class vocabulary
//! - Model metadata and service identity payloads

pub mod class;
pub mod detection;
pub mod model_info;
pub mod service;

// Re-export common types
pub use class::{SafetyClass, SafetyClassParseError};
pub use detection::{
    format_processing_time, parse_processing_time, BoundingBox, Detection, DetectionResponse,
};
pub use model_info::{ModelInfo, MODEL_INPUT_SIZE, MODEL_VERSION};
pub use service::{HealthResponse, ServiceIndex, SERVICE_NAME, SERVICE_TITLE, SERVICE_VERSION};
