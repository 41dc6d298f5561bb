//! Decoding uploaded bytes into an in-memory raster.

use std::panic::{self, UnwindSafe};

use image::RgbImage;
use tracing::{debug, warn};

use crate::error::{VisionError, VisionResult};

/// Decoded 8-bit pixel buffer, row-major and interleaved.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

impl Raster {
    /// Wrap an RGB image. Fails if either dimension is zero.
    pub fn from_rgb(img: RgbImage) -> VisionResult<Self> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(VisionError::EmptyRaster { width, height });
        }

        Ok(Self {
            width,
            height,
            channels: 3,
            pixels: img.into_raw(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Decode an encoded image (PNG, JPEG, or any other format the `image`
/// crate was built with) into a 3-channel raster.
///
/// Never panics on malformed input: every failure, including a codec
/// panic, is reported as a [`VisionError`] for which
/// [`VisionError::is_decode_error`] holds.
pub fn decode_image(bytes: &[u8]) -> VisionResult<Raster> {
    if bytes.is_empty() {
        return Err(VisionError::EmptyData);
    }

    let img = catch_decoder_panic(|| Ok(image::load_from_memory(bytes)?.to_rgb8()))?;
    let raster = Raster::from_rgb(img)?;

    debug!(
        width = raster.width,
        height = raster.height,
        size_bytes = bytes.len(),
        "Decoded image"
    );

    Ok(raster)
}

/// Run a codec call, turning a panic into [`VisionError::DecodeFailed`].
fn catch_decoder_panic<T>(
    decode: impl FnOnce() -> VisionResult<T> + UnwindSafe,
) -> VisionResult<T> {
    panic::catch_unwind(decode).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        warn!(reason = %reason, "Image decoder panicked");
        Err(VisionError::DecodeFailed(format!("decoder panicked: {reason}")))
    })
}
