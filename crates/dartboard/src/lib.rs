//! High-level facade for the `dartboard-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core input types and the scoring engine
//! - JSON helpers for detection files, scoring configs and score reports
//! - (feature `cli`) the `dartboard` command-line tool
//!
//! ## Quickstart
//!
//! ```no_run
//! use dartboard::io::{DetectionFile, ScoreReport};
//! use dartboard::scoring::DartScorer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = DetectionFile::load_json("frame.json")?;
//! let frame = DartScorer::default().score_frame(&file.detections)?;
//! println!("total: {}", frame.total);
//!
//! let mut report = ScoreReport::new("frame.json");
//! report.set_frame(&frame);
//! report.write_json("frame_score.json")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `dartboard::core`: boxes, detections, logger setup.
//! - `dartboard::scoring`: calibration, sectors, rings, per-dart and per-frame scoring.
//! - `dartboard::io`: JSON in and out.

pub use dartboard_core as core;
pub use dartboard_scoring as scoring;

pub use dartboard_core::{BoundingBox, Detection, DetectionLabel, InputError};
pub use dartboard_scoring::{
    BoardGeometry, DartScorer, FrameScore, Ring, ScoreError, ScoredDart, ScoringParams,
};

pub mod io;
