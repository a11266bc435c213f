//! Angular sector resolution.
//!
//! Angles come from `atan2(y, x)` on the board-centred offset in image
//! orientation (`+y` down), so they grow clockwise on screen and `0°` points
//! at 3 o'clock. Rotating by a quarter turn puts `0°` at 12 o'clock; adding
//! half a sector moves the arc boundaries onto multiples of 18°, which lets
//! the index be a plain floor division. Arcs are half-open: an angle exactly
//! on a boundary belongs to the sector that starts there.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::ScoreError;

pub const SECTOR_COUNT: usize = 20;
pub const SECTOR_WIDTH_DEG: f64 = 360.0 / SECTOR_COUNT as f64;

/// Base values clockwise from the top of the board.
pub const SECTOR_VALUES: [u8; SECTOR_COUNT] = [
    20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5,
];

/// Quarter turn from 3 o'clock to 12 o'clock.
const TOP_OFFSET_DEG: f64 = 90.0;
const HALF_SECTOR_DEG: f64 = SECTOR_WIDTH_DEG / 2.0;

/// Default rounding step applied before the floor division.
pub const DEFAULT_ANGLE_PRECISION_DEG: f64 = 1e-6;
/// Finest accepted rounding step; step counts stay exact in an `f64`.
pub const MIN_ANGLE_PRECISION_DEG: f64 = 1e-9;

/// Check a rounding step and return how many steps make up one sector.
///
/// The step must divide the sector width, otherwise sectors would span
/// different numbers of steps and the circle would not split into equal arcs.
pub fn steps_per_sector(precision_deg: f64) -> Result<u64, ScoreError> {
    if !(precision_deg.is_finite()
        && (MIN_ANGLE_PRECISION_DEG..=HALF_SECTOR_DEG).contains(&precision_deg))
    {
        return Err(ScoreError::InvalidParams(format!(
            "angle precision must lie in [{MIN_ANGLE_PRECISION_DEG}, {HALF_SECTOR_DEG}] degrees (got {precision_deg})"
        )));
    }
    let ratio = SECTOR_WIDTH_DEG / precision_deg;
    let steps = ratio.round();
    if (ratio - steps).abs() > ratio * 1e-9 {
        return Err(ScoreError::InvalidParams(format!(
            "angle precision must divide the {SECTOR_WIDTH_DEG} deg sector width (got {precision_deg})"
        )));
    }
    Ok(steps as u64)
}

/// Sector a dart landed in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    /// Raw `atan2` angle in `[0, 360)`.
    pub angle_degrees: f64,
    /// Index into [`SECTOR_VALUES`].
    pub index: usize,
    pub base_value: u8,
}

/// Resolves angles to sectors with a fixed rounding step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectorResolver {
    precision_deg: f64,
    steps_per_sector: u64,
}

impl SectorResolver {
    pub fn new(precision_deg: f64) -> Result<Self, ScoreError> {
        Ok(Self {
            precision_deg,
            steps_per_sector: steps_per_sector(precision_deg)?,
        })
    }

    /// Sector index for a raw `atan2` angle in degrees (any range).
    ///
    /// Counting whole rounding steps keeps boundary angles from flipping
    /// between neighbours on floating-point noise.
    pub fn index_for_angle(&self, raw_deg: f64) -> usize {
        let adjusted = (raw_deg + TOP_OFFSET_DEG + HALF_SECTOR_DEG).rem_euclid(360.0);
        let steps = (adjusted / self.precision_deg).round() as u64;
        (steps / self.steps_per_sector) as usize % SECTOR_COUNT
    }

    /// Resolve the sector of a board-centred offset.
    pub fn resolve(&self, offset: Vector2<f64>) -> Sector {
        let angle_degrees = normalize_degrees(offset.y.atan2(offset.x).to_degrees());
        let index = self.index_for_angle(angle_degrees);
        Sector {
            angle_degrees,
            index,
            base_value: SECTOR_VALUES[index],
        }
    }
}

impl Default for SectorResolver {
    fn default() -> Self {
        Self {
            precision_deg: DEFAULT_ANGLE_PRECISION_DEG,
            steps_per_sector: (SECTOR_WIDTH_DEG / DEFAULT_ANGLE_PRECISION_DEG).round() as u64,
        }
    }
}

/// Wrap into `[0, 360)`.
fn normalize_degrees(deg: f64) -> f64 {
    let a = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}
