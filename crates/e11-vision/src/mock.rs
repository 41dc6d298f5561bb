//! Placeholder detector producing randomized, plausible detections.

use e11_models::{BoundingBox, Detection, SafetyClass};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::detector::Detector;
use crate::error::VisionResult;
use crate::raster::Raster;

/// Lower bound of the noise added to a prototype's confidence.
pub const CONFIDENCE_JITTER_MIN: f64 = -0.10;

/// Upper bound of the noise added to a prototype's confidence.
pub const CONFIDENCE_JITTER_MAX: f64 = 0.05;

/// Template detection the mock samples from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prototype {
    pub class: SafetyClass,
    pub base_confidence: f64,
    /// `[x, y, width, height]` as fractions of the frame size
    pub fractions: [f64; 4],
}

impl Prototype {
    /// Bounding box of this prototype on a `width` x `height` frame.
    pub fn bbox_for(&self, width: u32, height: u32) -> BoundingBox {
        BoundingBox::from_fractions(self.fractions, width, height)
    }
}

static PROTOTYPES: [Prototype; 3] = [
    Prototype {
        class: SafetyClass::FireExtinguisher,
        base_confidence: 0.942,
        fractions: [0.15, 0.25, 0.12, 0.30],
    },
    Prototype {
        class: SafetyClass::OxygenTank,
        base_confidence: 0.887,
        fractions: [0.65, 0.15, 0.08, 0.40],
    },
    Prototype {
        class: SafetyClass::Toolkit,
        base_confidence: 0.915,
        fractions: [0.35, 0.55, 0.15, 0.20],
    },
];

/// Mock detector standing in for the trained YOLOv8 model.
///
/// Each call picks 1 to 3 distinct prototypes uniformly at random, in random
/// order, scales their boxes to the raster and jitters their confidence.
/// Confidence is intentionally left unclamped, so it can leave [0, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct MockDetector;

impl MockDetector {
    pub fn new() -> Self {
        Self
    }

    /// The fixed prototypes, one per class.
    pub fn prototypes() -> &'static [Prototype] {
        &PROTOTYPES
    }

    /// Run the mock with a caller-supplied random source.
    pub fn detect_with_rng<R: Rng + ?Sized>(&self, raster: &Raster, rng: &mut R) -> Vec<Detection> {
        let (width, height) = raster.dimensions();
        let count = rng.random_range(1..=PROTOTYPES.len());

        // A shuffled prefix is a uniform subset in uniform random order.
        let mut picked: Vec<&Prototype> = PROTOTYPES.iter().collect();
        picked.shuffle(rng);
        picked.truncate(count);

        let detections: Vec<Detection> = picked
            .into_iter()
            .map(|proto| {
                let jitter = rng.random_range(CONFIDENCE_JITTER_MIN..=CONFIDENCE_JITTER_MAX);
                Detection::new(
                    proto.class,
                    proto.base_confidence + jitter,
                    proto.bbox_for(width, height),
                )
            })
            .collect();

        debug!(width, height, count = detections.len(), "Mock detection completed");

        detections
    }
}

impl Detector for MockDetector {
    fn detect(&self, raster: &Raster) -> VisionResult<Vec<Detection>> {
        Ok(self.detect_with_rng(raster, &mut rand::rng()))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
