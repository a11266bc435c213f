use dartboard_core::InputError;

/// Errors returned by the scoring engine.
///
/// Darts off the board, missing bull detections and sector-boundary ties are
/// not errors; they classify as `Miss`, `Single` and a fixed sector.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("dartboard calibration failed: degenerate board box (width={width}, height={height})")]
    Calibration { width: f64, height: f64 },
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    #[error("invalid board geometry: {0}")]
    InvalidGeometry(String),
    #[error("invalid scoring parameters: {0}")]
    InvalidParams(String),
    #[error("no dartboard detection in frame")]
    MissingDartboard,
}
