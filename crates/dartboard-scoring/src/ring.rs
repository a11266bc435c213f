use serde::{Deserialize, Serialize};

use crate::BoardGeometry;

/// Radial band a dart landed in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ring {
    InnerBull,
    OuterBull,
    Triple,
    Double,
    Single,
    Miss,
}

impl Ring {
    /// Classify a distance from the board center.
    ///
    /// Checks run in a fixed order and the first match wins, so a distance
    /// on a shared edge goes to the band tested first. The bull bands are
    /// only reachable when `bull_confirmed` is set, i.e. a bull detection
    /// contains the dart; without that evidence a dart near the center
    /// scores as a single.
    pub fn classify(distance_mm: f64, bull_confirmed: bool, geometry: &BoardGeometry) -> Ring {
        if bull_confirmed {
            if distance_mm <= geometry.inner_bull_radius_mm {
                return Ring::InnerBull;
            }
            if distance_mm <= geometry.outer_bull_radius_mm {
                return Ring::OuterBull;
            }
        }
        if (geometry.triple_inner_mm..=geometry.triple_outer_mm).contains(&distance_mm) {
            Ring::Triple
        } else if (geometry.double_inner_mm..=geometry.double_outer_mm).contains(&distance_mm) {
            Ring::Double
        } else if distance_mm > geometry.double_outer_mm {
            Ring::Miss
        } else {
            Ring::Single
        }
    }

    /// Points for this ring given the sector's base value.
    pub fn score(self, base_value: u8) -> u32 {
        let base = u32::from(base_value);
        match self {
            Ring::InnerBull => 50,
            Ring::OuterBull => 25,
            Ring::Triple => 3 * base,
            Ring::Double => 2 * base,
            Ring::Single => base,
            Ring::Miss => 0,
        }
    }

    pub fn is_bull(self) -> bool {
        matches!(self, Ring::InnerBull | Ring::OuterBull)
    }

    /// Scorer's shorthand: `T20`, `D16`, `S5`, `BULL`, `25`, `MISS`.
    pub fn notation(self, base_value: u8) -> String {
        match self {
            Ring::InnerBull => "BULL".to_string(),
            Ring::OuterBull => "25".to_string(),
            Ring::Triple => format!("T{base_value}"),
            Ring::Double => format!("D{base_value}"),
            Ring::Single => format!("S{base_value}"),
            Ring::Miss => "MISS".to_string(),
        }
    }
}
