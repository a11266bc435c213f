/// Malformed detector output, rejected before any geometry runs.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("non-finite {field} coordinate ({value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("inverted box on the x axis (x_min={min} > x_max={max})")]
    InvertedX { min: f64, max: f64 },
    #[error("inverted box on the y axis (y_min={min} > y_max={max})")]
    InvertedY { min: f64, max: f64 },
    #[error("box has no extent (width={width}, height={height})")]
    EmptyExtent { width: f64, height: f64 },
    #[error("confidence {0} outside [0, 1]")]
    InvalidConfidence(f64),
    #[error("unknown detection label {0:?}")]
    UnknownLabel(String),
}
