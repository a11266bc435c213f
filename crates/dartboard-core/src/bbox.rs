use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::InputError;

/// Unvalidated box corners as they come off the wire.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxCoords {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// Axis-aligned rectangle in source-image pixel coordinates.
///
/// Construction guarantees finite coordinates with `x_min <= x_max` and
/// `y_min <= y_max`. A zero-sized box is representable so that callers can
/// tell a degenerate detection apart from a corrupted one; use
/// [`BoundingBox::ensure_extent`] where a strictly positive area is required.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoxCoords")]
pub struct BoundingBox {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl BoundingBox {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self, InputError> {
        for (field, value) in [
            ("x_min", x_min),
            ("y_min", y_min),
            ("x_max", x_max),
            ("y_max", y_max),
        ] {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field, value });
            }
        }
        if x_min > x_max {
            return Err(InputError::InvertedX {
                min: x_min,
                max: x_max,
            });
        }
        if y_min > y_max {
            return Err(InputError::InvertedY {
                min: y_min,
                max: y_max,
            });
        }
        Ok(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Box of the given size centred on `(cx, cy)`.
    pub fn from_center(cx: f64, cy: f64, width: f64, height: f64) -> Result<Self, InputError> {
        Self::new(
            cx - 0.5 * width,
            cy - 0.5 * height,
            cx + 0.5 * width,
            cy + 0.5 * height,
        )
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            0.5 * (self.x_min + self.x_max),
            0.5 * (self.y_min + self.y_max),
        )
    }

    /// Closed containment test: points on the border are inside.
    #[inline]
    pub fn contains(&self, p: Point2<f64>) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    /// `true` when the box collapsed to a single point.
    pub fn is_point(&self) -> bool {
        self.width() <= 0.0 && self.height() <= 0.0
    }

    /// Reject boxes with zero width or zero height.
    pub fn ensure_extent(&self) -> Result<(), InputError> {
        let (width, height) = (self.width(), self.height());
        if width > 0.0 && height > 0.0 {
            Ok(())
        } else {
            Err(InputError::EmptyExtent { width, height })
        }
    }

    pub fn coords(&self) -> BoxCoords {
        BoxCoords {
            x_min: self.x_min,
            y_min: self.y_min,
            x_max: self.x_max,
            y_max: self.y_max,
        }
    }
}

impl TryFrom<BoxCoords> for BoundingBox {
    type Error = InputError;

    fn try_from(c: BoxCoords) -> Result<Self, Self::Error> {
        Self::new(c.x_min, c.y_min, c.x_max, c.y_max)
    }
}
