//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use e11_vision::VisionError;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("File must be an image")]
    InvalidContentType,

    #[error("Error processing image: {0}")]
    Decode(String),

    #[error("{0}")]
    MissingFile(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Detection failed: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn missing_file(msg: impl Into<String>) -> Self {
        Self::MissingFile(msg.into())
    }

    pub fn payload_too_large(limit: usize) -> Self {
        Self::PayloadTooLarge(format!("Request body exceeds the {limit} byte limit"))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidContentType | ApiError::Decode(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingFile(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidContentType => "content_type",
            ApiError::Decode(_) => "decode",
            ApiError::MissingFile(_) => "missing_file",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<VisionError> for ApiError {
    fn from(err: VisionError) -> Self {
        if err.is_decode_error() {
            Self::Decode(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
