//! Error types for vision operations.

use thiserror::Error;

/// Result type for vision operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors that can occur while decoding or analysing an image.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Image data is empty")]
    EmptyData,

    #[error("Could not decode image: {0}")]
    DecodeFailed(String),

    #[error("Decoded image has no pixels ({width}x{height})")]
    EmptyRaster { width: u32, height: u32 },

    #[error("Detector failed: {0}")]
    Detector(String),
}

impl VisionError {
    /// Create a detector failure error.
    pub fn detector(message: impl Into<String>) -> Self {
        Self::Detector(message.into())
    }

    /// Returns true if the input bytes were at fault rather than the detector.
    pub fn is_decode_error(&self) -> bool {
        !matches!(self, VisionError::Detector(_))
    }
}

impl From<image::ImageError> for VisionError {
    fn from(err: image::ImageError) -> Self {
        Self::DecodeFailed(err.to_string())
    }
}
