use serde::{Deserialize, Serialize};

use crate::sector::{steps_per_sector, DEFAULT_ANGLE_PRECISION_DEG};
use crate::{BoardGeometry, ScoreError};

/// Configuration for [`crate::DartScorer`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    pub geometry: BoardGeometry,
    /// Dart detections below this confidence are dropped by frame scoring.
    ///
    /// Single-dart scoring does not look at confidence.
    pub min_dart_confidence: f64,
    /// Rounding step for sector angles, in degrees. Must divide 18.
    pub angle_precision_deg: f64,
}

impl ScoringParams {
    pub fn validate(&self) -> Result<(), ScoreError> {
        self.geometry.validate()?;
        if !(0.0..=1.0).contains(&self.min_dart_confidence) {
            return Err(ScoreError::InvalidParams(format!(
                "min_dart_confidence must lie in [0, 1] (got {})",
                self.min_dart_confidence
            )));
        }
        steps_per_sector(self.angle_precision_deg)?;
        Ok(())
    }
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            geometry: BoardGeometry::STANDARD,
            min_dart_confidence: 0.0,
            angle_precision_deg: DEFAULT_ANGLE_PRECISION_DEG,
        }
    }
}
