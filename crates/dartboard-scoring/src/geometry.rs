//! Physical layout of a standard steel-tip dartboard, in millimetres.
//!
//! All radii are measured from the board center. Ring bands are closed on
//! both ends; classification order decides which band owns a shared edge.

use serde::{Deserialize, Serialize};

use crate::ScoreError;

/// Diameter of the board face the detector's `Dartboard` box is mapped to.
pub const REAL_BOARD_DIAMETER_MM: f64 = 340.0;
/// Inner bull (50 points).
pub const INNER_BULL_RADIUS_MM: f64 = 6.35;
/// Outer bull (25 points).
pub const OUTER_BULL_RADIUS_MM: f64 = 15.875;
pub const TRIPLE_RING_INNER_MM: f64 = 107.95;
pub const TRIPLE_RING_OUTER_MM: f64 = 114.3;
pub const DOUBLE_RING_INNER_MM: f64 = 170.0;
pub const DOUBLE_RING_OUTER_MM: f64 = 176.35;

/// Board dimensions used to calibrate and classify.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardGeometry {
    /// Real diameter matched to the larger side of the detected board box.
    pub board_diameter_mm: f64,
    pub inner_bull_radius_mm: f64,
    pub outer_bull_radius_mm: f64,
    pub triple_inner_mm: f64,
    pub triple_outer_mm: f64,
    pub double_inner_mm: f64,
    /// Anything strictly beyond this radius is a miss.
    pub double_outer_mm: f64,
}

impl BoardGeometry {
    pub const STANDARD: BoardGeometry = BoardGeometry {
        board_diameter_mm: REAL_BOARD_DIAMETER_MM,
        inner_bull_radius_mm: INNER_BULL_RADIUS_MM,
        outer_bull_radius_mm: OUTER_BULL_RADIUS_MM,
        triple_inner_mm: TRIPLE_RING_INNER_MM,
        triple_outer_mm: TRIPLE_RING_OUTER_MM,
        double_inner_mm: DOUBLE_RING_INNER_MM,
        double_outer_mm: DOUBLE_RING_OUTER_MM,
    };

    /// Radii in the order they must strictly increase.
    fn radii(&self) -> [(&'static str, f64); 6] {
        [
            ("inner_bull_radius_mm", self.inner_bull_radius_mm),
            ("outer_bull_radius_mm", self.outer_bull_radius_mm),
            ("triple_inner_mm", self.triple_inner_mm),
            ("triple_outer_mm", self.triple_outer_mm),
            ("double_inner_mm", self.double_inner_mm),
            ("double_outer_mm", self.double_outer_mm),
        ]
    }

    /// Check that every dimension is finite and positive and that the
    /// radii grow from the bull outwards.
    pub fn validate(&self) -> Result<(), ScoreError> {
        if !(self.board_diameter_mm.is_finite() && self.board_diameter_mm > 0.0) {
            return Err(ScoreError::InvalidGeometry(format!(
                "board_diameter_mm must be finite and positive (got {})",
                self.board_diameter_mm
            )));
        }
        let radii = self.radii();
        for (name, r) in radii {
            if !(r.is_finite() && r > 0.0) {
                return Err(ScoreError::InvalidGeometry(format!(
                    "{name} must be finite and positive (got {r})"
                )));
            }
        }
        for pair in radii.windows(2) {
            let ((inner_name, inner), (outer_name, outer)) = (pair[0], pair[1]);
            if inner >= outer {
                return Err(ScoreError::InvalidGeometry(format!(
                    "{inner_name} ({inner}) must be smaller than {outer_name} ({outer})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_board_is_valid() {
        assert!(BoardGeometry::STANDARD.validate().is_ok());
        assert_eq!(BoardGeometry::default(), BoardGeometry::STANDARD);
    }

    #[test]
    fn overlapping_bands_are_rejected() {
        let g = BoardGeometry {
            triple_outer_mm: 180.0,
            ..BoardGeometry::STANDARD
        };
        let err = g.validate().unwrap_err();
        assert!(matches!(err, ScoreError::InvalidGeometry(ref m) if m.contains("triple_outer_mm")));
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let g = BoardGeometry {
            board_diameter_mm: 0.0,
            ..BoardGeometry::STANDARD
        };
        assert!(g.validate().is_err());

        let g = BoardGeometry {
            inner_bull_radius_mm: f64::NAN,
            ..BoardGeometry::STANDARD
        };
        assert!(g.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_standard() {
        let g: BoardGeometry = serde_json::from_str(r#"{"board_diameter_mm": 451.0}"#).unwrap();
        assert_eq!(g.board_diameter_mm, 451.0);
        assert_eq!(g.double_outer_mm, DOUBLE_RING_OUTER_MM);
    }
}
