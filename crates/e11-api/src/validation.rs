//! Upload validation performed before any decoding.

use crate::error::{ApiError, ApiResult};

/// Declared content-types must start with this prefix.
pub const IMAGE_CONTENT_TYPE_PREFIX: &str = "image/";

/// Check the declared content-type of an upload.
///
/// Only the header is inspected, never the bytes. A missing content-type is
/// rejected like any other non-image type.
pub fn validate_content_type(content_type: Option<&str>) -> ApiResult<()> {
    match content_type {
        Some(ct) if ct.starts_with(IMAGE_CONTENT_TYPE_PREFIX) => Ok(()),
        _ => Err(ApiError::InvalidContentType),
    }
}
