//! Detection orchestration: validate, decode, detect, package.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use e11_models::DetectionResponse;
use e11_vision::{decode_image, Detector, MockDetector};
use tracing::{error, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::validation::validate_content_type;

/// Runs one upload through validation, decoding and the configured detector.
///
/// Holds no per-request state; the detector is shared read-only.
#[derive(Clone)]
pub struct DetectionService {
    detector: Arc<dyn Detector>,
}

impl DetectionService {
    pub fn new(detector: Arc<dyn Detector>) -> Self {
        Self { detector }
    }

    /// Service backed by [`MockDetector`].
    pub fn mock() -> Self {
        Self::new(Arc::new(MockDetector::new()))
    }

    pub fn detector_name(&self) -> &'static str {
        self.detector.name()
    }

    /// Detect objects in an uploaded image.
    ///
    /// `processing_time` spans validation through the detector's return.
    pub fn detect_objects(
        &self,
        content_type: Option<&str>,
        payload: &[u8],
    ) -> ApiResult<DetectionResponse> {
        let result = self.run(content_type, payload);
        if let Err(e) = &result {
            metrics::record_detect_failure(e.kind());
        }
        result
    }

    /// Same as [`detect_objects`](Self::detect_objects), run on the blocking
    /// pool. A panic inside the detector becomes an internal error.
    pub async fn detect_upload(
        &self,
        content_type: Option<String>,
        payload: Bytes,
    ) -> ApiResult<DetectionResponse> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.detect_objects(content_type.as_deref(), &payload))
            .await
            .map_err(|e| {
                error!(error = %e, "Detection task aborted");
                metrics::record_detect_failure("internal");
                ApiError::internal(e.to_string())
            })?
    }

    fn run(&self, content_type: Option<&str>, payload: &[u8]) -> ApiResult<DetectionResponse> {
        let start = Instant::now();

        if let Err(e) = validate_content_type(content_type) {
            warn!(
                content_type = content_type.unwrap_or("<none>"),
                size_bytes = payload.len(),
                "Rejected upload with non-image content type"
            );
            return Err(e);
        }

        let raster = decode_image(payload).map_err(|e| {
            warn!(
                content_type = content_type.unwrap_or("<none>"),
                size_bytes = payload.len(),
                error = %e,
                "Error processing image"
            );
            ApiError::from(e)
        })?;

        let (width, height) = raster.dimensions();
        info!(width, height, "Processing image");

        let detections = self.detector.detect(&raster).map_err(|e| {
            error!(
                detector = self.detector.name(),
                width,
                height,
                error = %e,
                "Detection error"
            );
            ApiError::internal(e.to_string())
        })?;

        let elapsed = start.elapsed();
        let response = DetectionResponse::new(detections, elapsed, Some((width, height)));

        info!(
            count = response.total_detections,
            processing_time = %response.processing_time,
            "Detection completed"
        );
        metrics::record_detection(&response, elapsed.as_secs_f64());

        Ok(response)
    }
}
