//! Application state.

use std::sync::Arc;

use e11_vision::{Detector, MockDetector};

use crate::config::ApiConfig;
use crate::services::DetectionService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub detection: DetectionService,
}

impl AppState {
    /// Create application state backed by the mock detector.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_detector(config, Arc::new(MockDetector::new()))
    }

    /// Create application state with a specific detector implementation.
    pub fn with_detector(config: ApiConfig, detector: Arc<dyn Detector>) -> Self {
        Self {
            config,
            detection: DetectionService::new(detector),
        }
    }
}
