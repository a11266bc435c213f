use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, BoxCoords, InputError};

/// Object classes produced by the dart detector.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionLabel {
    Dartboard,
    Bull,
    Dart,
}

impl DetectionLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionLabel::Dartboard => "dartboard",
            DetectionLabel::Bull => "bull",
            DetectionLabel::Dart => "dart",
        }
    }
}

impl fmt::Display for DetectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionLabel {
    type Err = InputError;

    /// Case-insensitive; accepts the class names a YOLO-style model emits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dartboard" | "board" => Ok(DetectionLabel::Dartboard),
            "bull" | "bullseye" => Ok(DetectionLabel::Bull),
            "dart" => Ok(DetectionLabel::Dart),
            _ => Err(InputError::UnknownLabel(s.to_string())),
        }
    }
}

/// One labelled box with the detector's confidence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDetection")]
pub struct Detection {
    pub label: DetectionLabel,
    pub bbox: BoundingBox,
    pub confidence: f64,
}

impl Detection {
    pub fn new(
        label: DetectionLabel,
        bbox: BoundingBox,
        confidence: f64,
    ) -> Result<Self, InputError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(InputError::InvalidConfidence(confidence));
        }
        Ok(Self {
            label,
            bbox,
            confidence,
        })
    }

    pub fn is(&self, label: DetectionLabel) -> bool {
        self.label == label
    }
}

fn full_confidence() -> f64 {
    1.0
}

/// Accepted wire shapes: the typed form this crate serializes, and the flat
/// row a detector exports (`xmin`/`x1` ... with a `name`/`class` field).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDetection {
    Typed {
        label: DetectionLabel,
        bbox: BoxCoords,
        #[serde(default = "full_confidence")]
        confidence: f64,
    },
    Flat {
        #[serde(alias = "x1")]
        xmin: f64,
        #[serde(alias = "y1")]
        ymin: f64,
        #[serde(alias = "x2")]
        xmax: f64,
        #[serde(alias = "y2")]
        ymax: f64,
        #[serde(default = "full_confidence")]
        confidence: f64,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        class: Option<ClassField>,
    },
}

/// YOLO exports carry the numeric class id next to `name`; hand-written
/// rows put the class name itself under `class`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassField {
    Name(String),
    Id(i64),
}

impl TryFrom<RawDetection> for Detection {
    type Error = InputError;

    fn try_from(raw: RawDetection) -> Result<Self, Self::Error> {
        match raw {
            RawDetection::Typed {
                label,
                bbox,
                confidence,
            } => Detection::new(label, bbox.try_into()?, confidence),
            RawDetection::Flat {
                xmin,
                ymin,
                xmax,
                ymax,
                confidence,
                name,
                label,
                class,
            } => {
                let label = match (name.or(label), class) {
                    (Some(s), _) | (None, Some(ClassField::Name(s))) => s.parse()?,
                    (None, Some(ClassField::Id(id))) => {
                        return Err(InputError::UnknownLabel(id.to_string()))
                    }
                    (None, None) => return Err(InputError::UnknownLabel(String::new())),
                };
                Detection::new(label, BoundingBox::new(xmin, ymin, xmax, ymax)?, confidence)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("Dartboard".parse::<DetectionLabel>(), Ok(DetectionLabel::Dartboard));
        assert_eq!(" BULL ".parse::<DetectionLabel>(), Ok(DetectionLabel::Bull));
        assert_eq!("dart".parse::<DetectionLabel>(), Ok(DetectionLabel::Dart));
        assert!(matches!(
            "person".parse::<DetectionLabel>(),
            Err(InputError::UnknownLabel(_))
        ));
    }

    #[test]
    fn confidence_must_be_a_probability() {
        let b = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(Detection::new(DetectionLabel::Dart, b, 0.5).is_ok());
        assert_eq!(
            Detection::new(DetectionLabel::Dart, b, 1.5),
            Err(InputError::InvalidConfidence(1.5))
        );
        assert!(Detection::new(DetectionLabel::Dart, b, f64::NAN).is_err());
    }

    #[test]
    fn deserializes_typed_shape() {
        let d: Detection = serde_json::from_str(
            r#"{"label":"bull","bbox":{"x_min":1,"y_min":2,"x_max":3,"y_max":4},"confidence":0.7}"#,
        )
        .unwrap();
        assert_eq!(d.label, DetectionLabel::Bull);
        assert_eq!(d.bbox.x_max(), 3.0);
        assert_eq!(d.confidence, 0.7);
    }

    #[test]
    fn deserializes_detector_rows() {
        let yolo: Detection = serde_json::from_str(
            r#"{"xmin":10,"ymin":20,"xmax":30,"ymax":40,"confidence":0.9,"class":0,"name":"dart"}"#,
        )
        .unwrap();
        assert_eq!(yolo.label, DetectionLabel::Dart);
        assert_eq!(yolo.bbox.center().x, 20.0);

        let flat: Detection = serde_json::from_str(
            r#"{"x1":50,"y1":50,"x2":100,"y2":100,"confidence":0.95,"class":"Dartboard"}"#,
        )
        .unwrap();
        assert_eq!(flat.label, DetectionLabel::Dartboard);
        assert_eq!(flat.bbox.width(), 50.0);
    }

    #[test]
    fn serialized_form_reads_back() {
        let b = BoundingBox::new(0.0, 0.0, 340.0, 340.0).unwrap();
        let d = Detection::new(DetectionLabel::Dartboard, b, 0.99).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains(r#""label":"dartboard""#));
        let back: Detection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn rejects_malformed_rows() {
        let inverted = serde_json::from_str::<Detection>(
            r#"{"xmin":30,"ymin":20,"xmax":10,"ymax":40,"name":"dart"}"#,
        );
        assert!(inverted.is_err());

        let unknown = serde_json::from_str::<Detection>(
            r#"{"xmin":0,"ymin":0,"xmax":1,"ymax":1,"name":"cat"}"#,
        );
        assert!(unknown.is_err());
    }
}
