//! Core input types for dartboard scoring.
//!
//! This crate holds the typed geometry that an object detector hands over to
//! the scoring engine: axis-aligned pixel boxes and labelled detections. It
//! knows nothing about dartboard layout; see `dartboard-scoring` for that.
//!
//! Image coordinates follow the usual convention: `x` grows to the right and
//! `y` grows downwards.

mod bbox;
mod detection;
mod error;
mod logger;

pub use bbox::{BoundingBox, BoxCoords};
pub use detection::{Detection, DetectionLabel};
pub use error::InputError;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
