use dartboard_core::{BoundingBox, Detection, DetectionLabel};
use log::{debug, warn};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::sector::SectorResolver;
use crate::{BoardCalibration, Ring, ScoreError, ScoringParams};

/// One dart with its score and the geometry that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredDart {
    pub dart: Detection,
    /// Offset of the dart center from the board center (mm, `+y` down).
    pub position_mm: Vector2<f64>,
    pub distance_mm: f64,
    /// Raw `atan2` angle of `position_mm` in `[0, 360)`.
    pub angle_degrees: f64,
    pub sector_index: usize,
    pub sector_base_value: u8,
    pub ring: Ring,
    pub score: u32,
}

/// All darts of one image scored against one board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameScore {
    pub board: Detection,
    pub bull: Option<Detection>,
    pub calibration: BoardCalibration,
    /// In input order.
    pub darts: Vec<ScoredDart>,
    /// Dart detections dropped for low confidence.
    pub skipped_darts: usize,
    pub total: u32,
}

/// Stateless scoring engine; safe to share across threads.
#[derive(Clone, Debug)]
pub struct DartScorer {
    params: ScoringParams,
    sectors: SectorResolver,
}

impl DartScorer {
    pub fn new(params: ScoringParams) -> Result<Self, ScoreError> {
        params.validate()?;
        let sectors = SectorResolver::new(params.angle_precision_deg)?;
        Ok(Self { params, sectors })
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    pub fn calibrate(&self, board: &BoundingBox) -> Result<BoardCalibration, ScoreError> {
        BoardCalibration::from_board(board, &self.params.geometry)
    }

    /// Score a single dart against an existing calibration.
    ///
    /// `bull` is the selected bull box, if the detector found one.
    pub fn score_dart(
        &self,
        calibration: &BoardCalibration,
        bull: Option<&BoundingBox>,
        dart: &Detection,
    ) -> Result<ScoredDart, ScoreError> {
        ensure_bull_extent(bull)?;
        self.score_checked(calibration, bull, dart)
    }

    /// Score a dart once the bull box is known to have extent.
    fn score_checked(
        &self,
        calibration: &BoardCalibration,
        bull: Option<&BoundingBox>,
        dart: &Detection,
    ) -> Result<ScoredDart, ScoreError> {
        dart.bbox.ensure_extent()?;

        let center = dart.bbox.center();
        let position_mm = calibration.to_board_mm(center);
        let distance_mm = position_mm.norm();
        let sector = self.sectors.resolve(position_mm);
        let bull_confirmed = bull.is_some_and(|b| b.contains(center));
        let ring = Ring::classify(distance_mm, bull_confirmed, &self.params.geometry);
        let score = ring.score(sector.base_value);

        debug!(
            "dart at ({:.2}, {:.2}) px -> ({:.3}, {:.3}) mm, r={:.3} mm, angle={:.2} deg, \
             sector #{} ({}), bull_confirmed={}, {:?} => {}",
            center.x,
            center.y,
            position_mm.x,
            position_mm.y,
            distance_mm,
            sector.angle_degrees,
            sector.index,
            sector.base_value,
            bull_confirmed,
            ring,
            score
        );

        Ok(ScoredDart {
            dart: *dart,
            position_mm,
            distance_mm,
            angle_degrees: sector.angle_degrees,
            sector_index: sector.index,
            sector_base_value: sector.base_value,
            ring,
            score,
        })
    }

    /// Calibrate once and score every dart, in order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip(self, darts), fields(num_darts = darts.len()))
    )]
    pub fn score_darts(
        &self,
        board: &BoundingBox,
        bull: Option<&BoundingBox>,
        darts: &[Detection],
    ) -> Result<Vec<ScoredDart>, ScoreError> {
        let calibration = self.calibrate(board)?;
        ensure_bull_extent(bull)?;
        darts
            .iter()
            .map(|d| self.score_checked(&calibration, bull, d))
            .collect()
    }

    /// Partition raw detections and score the frame.
    ///
    /// The most confident `Dartboard` and `Bull` detections are used (the
    /// first one wins a tie). Darts below `min_dart_confidence` are skipped.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip(self, detections), fields(num_detections = detections.len()))
    )]
    pub fn score_frame(&self, detections: &[Detection]) -> Result<FrameScore, ScoreError> {
        let board = most_confident(detections, DetectionLabel::Dartboard)
            .ok_or(ScoreError::MissingDartboard)?;
        let bull = most_confident(detections, DetectionLabel::Bull);

        let boards = count_label(detections, DetectionLabel::Dartboard);
        if boards > 1 {
            warn!(
                "{boards} dartboard detections, using the one with confidence {:.3}",
                board.confidence
            );
        }
        let bulls = count_label(detections, DetectionLabel::Bull);
        if bulls > 1 {
            warn!("{bulls} bull detections, using the most confident one");
        }

        let calibration = self.calibrate(&board.bbox)?;
        let bull_box = bull.as_ref().map(|b| &b.bbox);
        ensure_bull_extent(bull_box)?;

        let mut darts = Vec::new();
        let mut skipped_darts = 0;
        for d in detections.iter().filter(|d| d.is(DetectionLabel::Dart)) {
            if d.confidence < self.params.min_dart_confidence {
                skipped_darts += 1;
                continue;
            }
            darts.push(self.score_checked(&calibration, bull_box, d)?);
        }
        if skipped_darts > 0 {
            warn!(
                "skipped {skipped_darts} dart detection(s) below confidence {}",
                self.params.min_dart_confidence
            );
        }

        let total: u32 = darts.iter().map(|d| d.score).sum();
        debug!("scored {} dart(s), total {}", darts.len(), total);

        Ok(FrameScore {
            board,
            bull,
            calibration,
            darts,
            skipped_darts,
            total,
        })
    }
}

impl Default for DartScorer {
    fn default() -> Self {
        Self {
            params: ScoringParams::default(),
            sectors: SectorResolver::default(),
        }
    }
}

fn ensure_bull_extent(bull: Option<&BoundingBox>) -> Result<(), ScoreError> {
    if let Some(bull) = bull {
        bull.ensure_extent()?;
    }
    Ok(())
}

fn most_confident(detections: &[Detection], label: DetectionLabel) -> Option<Detection> {
    detections
        .iter()
        .filter(|d| d.is(label))
        .copied()
        .reduce(|best, d| if d.confidence > best.confidence { d } else { best })
}

fn count_label(detections: &[Detection], label: DetectionLabel) -> usize {
    detections.iter().filter(|d| d.is(label)).count()
}

/// Score one dart on a standard board.
pub fn score_dart(
    board: &BoundingBox,
    bull: Option<&BoundingBox>,
    dart: &Detection,
) -> Result<ScoredDart, ScoreError> {
    let scorer = DartScorer::default();
    let calibration = scorer.calibrate(board)?;
    scorer.score_dart(&calibration, bull, dart)
}

/// Score a whole frame of detections with the given parameters.
pub fn score_frame(
    detections: &[Detection],
    params: &ScoringParams,
) -> Result<FrameScore, ScoreError> {
    DartScorer::new(*params)?.score_frame(detections)
}
