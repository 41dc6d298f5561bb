//! Detection results and the response envelope returned by `POST /api/detect`.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::class::SafetyClass;
use crate::model_info::MODEL_VERSION;

/// Axis-aligned box in pixel units, origin at the top-left corner.
///
/// Serialized as a flat `[x, y, width, height]` array. Coordinates are not
/// clipped to the image, so a box may extend past its edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Scale a box given in fractions of the frame to whole pixels.
    ///
    /// Each component is truncated toward zero.
    pub fn from_fractions(fractions: [f64; 4], width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        Self {
            x: (fractions[0] * w).trunc(),
            y: (fractions[1] * h).trunc(),
            width: (fractions[2] * w).trunc(),
            height: (fractions[3] * h).trunc(),
        }
    }

    /// Check that width and height are non-negative and all values finite.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([x, y, width, height]: [f64; 4]) -> Self {
        Self { x, y, width, height }
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x, b.y, b.width, b.height]
    }
}

/// One predicted object instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Detection {
    /// Class label from the safety vocabulary
    pub class_name: String,
    /// Detection confidence, nominally [0, 1]
    pub confidence: f64,
    /// `[x, y, width, height]` in pixels
    #[schemars(with = "[f64; 4]")]
    pub bbox: BoundingBox,
}

impl Detection {
    /// Create a detection for a vocabulary class.
    pub fn new(class: SafetyClass, confidence: f64, bbox: BoundingBox) -> Self {
        Self {
            class_name: class.as_str().to_string(),
            confidence,
            bbox,
        }
    }

    /// Vocabulary class of this detection, if the label is known.
    pub fn class(&self) -> Option<SafetyClass> {
        self.class_name.parse().ok()
    }

    /// Returns true if the confidence lies in [0, 1].
    ///
    /// The mock detector adds unclamped noise, so this may be false.
    pub fn is_confidence_nominal(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
    }
}

/// Response body of a successful detection request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectionResponse {
    pub success: bool,
    pub detections: Vec<Detection>,
    /// Always equal to `detections.len()`
    pub total_detections: usize,
    /// Elapsed seconds with three decimals and an `s` suffix, e.g. `"0.013s"`
    pub processing_time: String,
    /// `[width, height]` of the decoded image
    pub image_dimensions: Option<[u32; 2]>,
    pub model_version: String,
}

impl DetectionResponse {
    /// Build a successful response.
    pub fn new(
        detections: Vec<Detection>,
        elapsed: Duration,
        image_dimensions: Option<(u32, u32)>,
    ) -> Self {
        Self {
            success: true,
            total_detections: detections.len(),
            detections,
            processing_time: format_processing_time(elapsed),
            image_dimensions: image_dimensions.map(|(w, h)| [w, h]),
            model_version: MODEL_VERSION.to_string(),
        }
    }

    /// Processing time in seconds, parsed back from the formatted string.
    pub fn processing_seconds(&self) -> Option<f64> {
        parse_processing_time(&self.processing_time)
    }
}

/// Format an elapsed duration as seconds with millisecond precision.
pub fn format_processing_time(elapsed: Duration) -> String {
    format!("{:.3}s", elapsed.as_secs_f64())
}

/// Parse a `"<seconds>s"` string produced by [`format_processing_time`].
pub fn parse_processing_time(s: &str) -> Option<f64> {
    let secs: f64 = s.strip_suffix('s')?.parse().ok()?;
    (secs.is_finite() && secs >= 0.0).then_some(secs)
}
