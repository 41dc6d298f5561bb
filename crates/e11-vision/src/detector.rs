//! Detector capability.
//!
//! The HTTP layer only ever talks to `dyn Detector`, so a trained model can
//! replace [`MockDetector`](crate::MockDetector) without touching request
//! validation or the response schema.

use e11_models::Detection;

use crate::error::VisionResult;
use crate::raster::Raster;

/// Object detection provider.
pub trait Detector: Send + Sync {
    /// Detect objects in a decoded raster.
    ///
    /// # Returns
    /// Zero or more detections with boxes in pixel coordinates of `raster`.
    fn detect(&self, raster: &Raster) -> VisionResult<Vec<Detection>>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
