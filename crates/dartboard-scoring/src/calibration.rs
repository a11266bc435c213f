use dartboard_core::BoundingBox;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::{BoardGeometry, ScoreError};

/// Pixel-to-millimetre mapping derived from the detected board box.
///
/// `scale` is the number of millimetres per pixel; it is uniform on both
/// axes because the board is assumed to face the camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardCalibration {
    /// Board center in image pixels.
    pub center: Point2<f64>,
    /// Larger side of the board box.
    pub pixel_diameter: f64,
    pub scale: f64,
}

impl BoardCalibration {
    /// Calibrate against the selected `Dartboard` box.
    ///
    /// A box collapsed to a single point is a calibration failure; a box with
    /// only one empty side is malformed input.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(geometry), fields(board_mm = geometry.board_diameter_mm))
    )]
    pub fn from_board(board: &BoundingBox, geometry: &BoardGeometry) -> Result<Self, ScoreError> {
        let (width, height) = (board.width(), board.height());
        if board.is_point() {
            return Err(ScoreError::Calibration { width, height });
        }
        board.ensure_extent()?;

        let pixel_diameter = width.max(height);
        let scale = geometry.board_diameter_mm / pixel_diameter;
        // Sub-normal boxes can still overflow the ratio.
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ScoreError::Calibration { width, height });
        }

        Ok(Self {
            center: board.center(),
            pixel_diameter,
            scale,
        })
    }

    /// Offset of an image point from the board center, in millimetres.
    ///
    /// The axes keep the image orientation: `+x` right, `+y` down.
    #[inline]
    pub fn to_board_mm(&self, p: Point2<f64>) -> Vector2<f64> {
        (p - self.center) * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bbox(x0: f64, y0: f64, x1: f64, y1: f64) -> BoundingBox {
        BoundingBox::new(x0, y0, x1, y1).expect("valid box")
    }

    #[test]
    fn unit_scale_for_a_340px_board() {
        let c = BoardCalibration::from_board(&bbox(0.0, 0.0, 340.0, 340.0), &BoardGeometry::STANDARD)
            .unwrap();
        assert_eq!(c.center, Point2::new(170.0, 170.0));
        assert_eq!(c.pixel_diameter, 340.0);
        assert_relative_eq!(c.scale, 1.0);
    }

    #[test]
    fn uses_the_larger_side() {
        let c = BoardCalibration::from_board(
            &bbox(100.0, 50.0, 780.0, 600.0),
            &BoardGeometry::STANDARD,
        )
        .unwrap();
        assert_eq!(c.pixel_diameter, 680.0);
        assert_relative_eq!(c.scale, 0.5);
        assert_eq!(c.center, Point2::new(440.0, 325.0));
    }

    #[test]
    fn maps_points_into_millimetres() {
        let c = BoardCalibration::from_board(&bbox(0.0, 0.0, 170.0, 170.0), &BoardGeometry::STANDARD)
            .unwrap();
        let v = c.to_board_mm(Point2::new(85.0, 35.0));
        assert_relative_eq!(v.x, 0.0);
        assert_relative_eq!(v.y, -100.0);
    }

    #[test]
    fn point_box_fails_calibration() {
        let err = BoardCalibration::from_board(&bbox(5.0, 5.0, 5.0, 5.0), &BoardGeometry::STANDARD)
            .unwrap_err();
        assert_eq!(
            err,
            ScoreError::Calibration {
                width: 0.0,
                height: 0.0
            }
        );
    }

    #[test]
    fn one_sided_box_is_invalid_input() {
        let err = BoardCalibration::from_board(&bbox(0.0, 5.0, 340.0, 5.0), &BoardGeometry::STANDARD)
            .unwrap_err();
        assert!(matches!(err, ScoreError::InvalidInput(_)));
    }

    #[test]
    fn tiny_boxes_still_yield_a_finite_scale() {
        let c = BoardCalibration::from_board(&bbox(0.0, 0.0, 1e-9, 1e-9), &BoardGeometry::STANDARD)
            .unwrap();
        assert!(c.scale.is_finite() && c.scale > 0.0);

        let err = BoardCalibration::from_board(
            &bbox(0.0, 0.0, f64::MIN_POSITIVE / 1e6, f64::MIN_POSITIVE / 1e6),
            &BoardGeometry::STANDARD,
        )
        .unwrap_err();
        assert!(matches!(err, ScoreError::Calibration { .. }));
    }
}
