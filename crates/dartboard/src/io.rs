//! JSON inputs and reports for dartboard scoring.

use dartboard_core::Detection;
use dartboard_scoring::{
    BoardCalibration, BoardGeometry, DartScorer, FrameScore, Ring, ScoreError, ScoringParams,
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn read_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T, IoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), IoError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Detector output for one image.
///
/// On disk this is either a bare array of detections or an object with a
/// `detections` array and an optional `source` (e.g. the image file name).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionFile {
    #[serde(default)]
    pub source: Option<String>,
    pub detections: Vec<Detection>,
}

impl DetectionFile {
    pub fn from_json_str(raw: &str) -> Result<Self, IoError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if value.is_array() {
            Ok(Self {
                source: None,
                detections: serde_json::from_value(value)?,
            })
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        write_json(self, path)
    }
}

/// Load a board geometry override; missing fields keep standard values.
pub fn load_geometry(path: impl AsRef<Path>) -> Result<BoardGeometry, IoError> {
    read_json(path)
}

/// Configuration for a config-driven scoring run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    pub detections_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: ScoringParams,
}

impl ScoreConfig {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        write_json(self, path)
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("dartboard_score_report.json"))
    }

    pub fn build_scorer(&self) -> Result<DartScorer, ScoreError> {
        DartScorer::new(self.params)
    }
}

/// Per-dart entry of a [`ScoreReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DartReport {
    pub dart: Detection,
    pub score: u32,
    pub ring: Ring,
    pub notation: String,
    pub sector_base_value: u8,
    pub distance_mm: f64,
    pub angle_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub source: String,
    #[serde(default)]
    pub calibration: Option<BoardCalibration>,
    #[serde(default)]
    pub darts: Vec<DartReport>,
    #[serde(default)]
    pub skipped_darts: usize,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub error: Option<String>,
}

impl ScoreReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            calibration: None,
            darts: Vec::new(),
            skipped_darts: 0,
            total: 0,
            error: None,
        }
    }

    /// Populate report fields from a scored frame.
    pub fn set_frame(&mut self, frame: &FrameScore) {
        self.calibration = Some(frame.calibration);
        self.darts = frame
            .darts
            .iter()
            .map(|d| DartReport {
                dart: d.dart,
                score: d.score,
                ring: d.ring,
                notation: d.ring.notation(d.sector_base_value),
                sector_base_value: d.sector_base_value,
                distance_mm: d.distance_mm,
                angle_degrees: d.angle_degrees,
            })
            .collect();
        self.skipped_darts = frame.skipped_darts;
        self.total = frame.total;
        self.error = None;
    }

    /// Record a scoring error; no scores are kept.
    pub fn set_error(&mut self, err: &ScoreError) {
        self.calibration = None;
        self.darts.clear();
        self.skipped_darts = 0;
        self.total = 0;
        self.error = Some(err.to_string());
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        write_json(self, path)
    }
}
