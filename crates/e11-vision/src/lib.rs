//! Image decoding and object detection for the Eleven11 service.
//!
//! - [`decode_image`] turns uploaded bytes into a 3-channel [`Raster`]
//! - [`Detector`] is the capability a detection model implements
//! - [`MockDetector`] synthesizes plausible detections until a trained
//!   model is wired in

pub mod detector;
pub mod error;
pub mod mock;
pub mod raster;

pub use detector::Detector;
pub use error::{VisionError, VisionResult};
pub use mock::{MockDetector, Prototype};
pub use raster::{decode_image, Raster};
