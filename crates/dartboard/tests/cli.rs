use assert_cmd::Command;
use dartboard::io::{ScoreConfig, ScoreReport};
use dartboard::{Ring, ScoringParams};
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn testdata_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}

fn dartboard() -> Command {
    Command::cargo_bin("dartboard").expect("binary built")
}

#[test]
fn scores_a_detector_export() {
    dartboard()
        .args(["score", "--detections"])
        .arg(testdata_path("frame_yolo.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("BULL = 50"))
        .stdout(predicate::str::contains("T20 = 60"))
        .stdout(predicate::str::contains("MISS =  0"))
        .stdout(predicate::str::contains("total: 110"));
}

#[test]
fn writes_a_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("nested").join("report.json");

    dartboard()
        .args(["score", "--min-confidence", "0.5", "--detections"])
        .arg(testdata_path("frame_typed.json"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("total: 72"));

    let report = ScoreReport::load_json(&out).expect("report");
    assert_eq!(report.source, "dart_1760000000000.jpg");
    assert_eq!(report.total, 72);
    assert_eq!(report.darts.len(), 2);
    assert_eq!(report.darts[0].ring, Ring::Triple);
    assert_eq!(report.darts[1].notation, "D6");
    assert!(report.error.is_none());
}

#[test]
fn calibration_failure_is_reported_and_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("report.json");

    dartboard()
        .args(["score", "--detections"])
        .arg(testdata_path("degenerate_board.json"))
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("calibration failed"));

    let report = ScoreReport::load_json(&out).expect("report");
    assert!(report.darts.is_empty());
    assert!(report
        .error
        .as_deref()
        .is_some_and(|e| e.contains("degenerate board box")));
}

#[test]
fn missing_board_fails() {
    dartboard()
        .args(["score", "--detections"])
        .arg(testdata_path("no_board.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no dartboard detection"));
}

#[test]
fn unreadable_input_fails() {
    dartboard()
        .args(["score", "--detections"])
        .arg(testdata_path("does_not_exist.json"))
        .assert()
        .failure();
}

#[test]
fn runs_from_a_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("report.json");
    let cfg_path = dir.path().join("config.json");
    let cfg = ScoreConfig {
        detections_path: testdata_path("frame_yolo.json")
            .to_string_lossy()
            .into_owned(),
        output_path: Some(out.to_string_lossy().into_owned()),
        params: ScoringParams {
            min_dart_confidence: 0.5,
            ..ScoringParams::default()
        },
    };
    cfg.write_json(&cfg_path).expect("write config");

    dartboard()
        .arg("run")
        .arg(&cfg_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped: 1"));

    let report = ScoreReport::load_json(&out).expect("report");
    assert_eq!(report.skipped_darts, 1);
    assert_eq!(report.total, 110);
}

#[test]
fn shipped_config_parses() {
    let cfg = ScoreConfig::load_json(testdata_path("score_config.json")).expect("config");
    assert_eq!(cfg.params.min_dart_confidence, 0.5);
    assert!(cfg.build_scorer().is_ok());
}

#[test]
fn board_info_prints_the_sector_table() {
    dartboard()
        .arg("board-info")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "20 1 18 4 13 6 10 15 2 17 3 19 7 16 8 11 14 9 12 5",
        ))
        .stdout(predicate::str::contains("triple      107.95 - 114.3"));
}

#[test]
fn board_info_rejects_bad_geometry() {
    let dir = tempfile::tempdir().expect("tempdir");
    let geometry = dir.path().join("geometry.json");
    std::fs::write(&geometry, r#"{"triple_inner_mm": 200.0}"#).expect("write geometry");

    dartboard()
        .args(["board-info", "--geometry"])
        .arg(&geometry)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid board geometry"));
}

#[cfg(not(feature = "tracing"))]
#[test]
fn verbose_logs_each_dart() {
    dartboard()
        .args(["-v", "score", "--detections"])
        .arg(testdata_path("frame_yolo.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG scoring::scorer] dart at"));

    dartboard()
        .args(["score", "--detections"])
        .arg(testdata_path("frame_yolo.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG").not());
}

#[test]
fn run_rejects_a_precision_that_splits_sectors_unevenly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg_path = dir.path().join("config.json");
    let cfg = ScoreConfig {
        detections_path: testdata_path("frame_yolo.json")
            .to_string_lossy()
            .into_owned(),
        output_path: Some(dir.path().join("report.json").to_string_lossy().into_owned()),
        params: ScoringParams {
            angle_precision_deg: 0.7,
            ..ScoringParams::default()
        },
    };
    cfg.write_json(&cfg_path).expect("write config");

    dartboard()
        .arg("run")
        .arg(&cfg_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must divide"));
}
