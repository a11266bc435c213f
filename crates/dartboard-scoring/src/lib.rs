//! Geometric dartboard scoring.
//!
//! Turns detector boxes (one dartboard, an optional bull, any number of
//! darts) into standard dartboard scores:
//!
//! 1. Calibrate: the board box's center and larger side map pixels onto a
//!    340 mm board ([`BoardCalibration`]).
//! 2. Locate: each dart box's center becomes a millimetre offset from the
//!    board center.
//! 3. Sector: the offset's angle picks one of 20 arcs of 18° clockwise from
//!    the "20" at the top ([`sector`]).
//! 4. Ring: the distance picks a band ([`Ring`]); bull points also need the
//!    dart to sit inside the detected bull box.
//!
//! The engine is pure: no I/O, no shared mutable state. Diagnostics go to the
//! `log` facade (and `tracing` spans with the `tracing` feature).
//!
//! ```
//! use dartboard_core::{BoundingBox, Detection, DetectionLabel};
//! use dartboard_scoring::{score_dart, Ring};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let board = BoundingBox::new(0.0, 0.0, 340.0, 340.0)?;
//! let bull = BoundingBox::new(163.65, 163.65, 176.35, 176.35)?;
//! let dart = Detection::new(
//!     DetectionLabel::Dart,
//!     BoundingBox::new(166.825, 166.825, 173.175, 173.175)?,
//!     0.9,
//! )?;
//!
//! let scored = score_dart(&board, Some(&bull), &dart)?;
//! assert_eq!(scored.ring, Ring::InnerBull);
//! assert_eq!(scored.score, 50);
//! # Ok(())
//! # }
//! ```

mod calibration;
mod error;
mod geometry;
mod params;
mod ring;
mod scorer;
pub mod sector;

pub use calibration::BoardCalibration;
pub use error::ScoreError;
pub use geometry::{
    BoardGeometry, DOUBLE_RING_INNER_MM, DOUBLE_RING_OUTER_MM, INNER_BULL_RADIUS_MM,
    OUTER_BULL_RADIUS_MM, REAL_BOARD_DIAMETER_MM, TRIPLE_RING_INNER_MM, TRIPLE_RING_OUTER_MM,
};
pub use params::ScoringParams;
pub use ring::Ring;
pub use scorer::{score_dart, score_frame, DartScorer, FrameScore, ScoredDart};
pub use sector::{Sector, SectorResolver, SECTOR_VALUES};

pub use dartboard_core::{BoundingBox, Detection, DetectionLabel, InputError};
