//! Object detection upload handler.

use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use e11_models::DetectionResponse;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Multipart field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";

/// Image part extracted from a multipart body.
#[derive(Debug)]
struct ImageUpload {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

/// Detect safety equipment in an uploaded image.
///
/// Expects `multipart/form-data` with one `image` file field. The body size
/// limit is enforced while the multipart stream is read.
pub async fn detect(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<DetectionResponse>> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "Detect request is not multipart");
        ApiError::missing_file(rejection.body_text())
    })?;

    let limit = state.config.max_body_size;
    let upload = read_image_field(&mut multipart, limit).await?;

    debug!(
        file_name = %upload.file_name,
        content_type = upload.content_type.as_deref().unwrap_or("<none>"),
        size_bytes = upload.data.len(),
        "Received image upload"
    );

    let response = state
        .detection
        .detect_upload(upload.content_type, upload.data)
        .await?;

    Ok(Json(response))
}

/// Find the `image` file field, skipping any others.
///
/// A plain form value named `image` (no `filename`) is not a file upload.
async fn read_image_field(multipart: &mut Multipart, limit: usize) -> ApiResult<ImageUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            debug!("Skipping non-file 'image' form value");
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        return Ok(ImageUpload {
            file_name,
            content_type,
            data,
        });
    }

    warn!("Detect request has no image file field");
    Err(ApiError::missing_file(format!(
        "Missing required multipart file field '{IMAGE_FIELD}'"
    )))
}

fn multipart_error(err: MultipartError, limit: usize) -> ApiError {
    warn!(error = %err.body_text(), "Failed to read multipart body");
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large(limit)
    } else {
        ApiError::missing_file(err.body_text())
    }
}
