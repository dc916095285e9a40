//! CLI integration tests for arcnet-cli.
//!
//! These tests verify the CLI behavior by running the actual binary against
//! a temporary directory of SRS files and checking outputs and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = include_str!("../../arcnet-core/testdata/20221112SRS.txt");
const NO_REGIONS: &str = include_str!("../../arcnet-core/testdata/20221113SRS.txt");

/// Get a Command for the arcnet binary.
fn arcnet() -> Command {
    Command::cargo_bin("arcnet").unwrap()
}

/// Directory holding the 12 and 13 Nov 2022 reports.
fn srs_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("20221112SRS.txt"), SAMPLE).unwrap();
    fs::write(dir.path().join("20221113SRS.txt"), NO_REGIONS).unwrap();
    dir
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    arcnet()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solar active region classification"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("detect"));
}

#[test]
fn test_version_displays_version() {
    arcnet()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("arcnet"));
}

#[test]
fn test_help_shows_exit_codes() {
    arcnet()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes:"))
        .stdout(predicate::str::contains("66"))
        .stdout(predicate::str::contains("69"));
}

// ============================================================================
// Usage Errors
// ============================================================================

#[test]
fn test_invalid_time_is_usage_error() {
    arcnet()
        .args(["detect", "--time", "noon"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("not a valid time"));
}

#[test]
fn test_missing_coordinate_is_usage_error() {
    arcnet()
        .args(["classify", "--time", "2022-11-12T09:30:00Z", "--lat", "10"])
        .assert()
        .code(64);
}

#[test]
fn test_missing_archive_dir_is_no_input() {
    arcnet()
        .args([
            "detect",
            "--time",
            "2022-11-12T09:30:00Z",
            "--archive-dir",
            "/nonexistent/arcnet/srs",
        ])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Archive directory not found"));
}

// ============================================================================
// Classify Tests
// ============================================================================

#[test]
fn test_classify_json_matches_region() {
    let dir = srs_dir();

    let output = arcnet()
        .args(["classify", "--time", "2022-11-12T09:30:00Z"])
        .args(["--lat", "-70", "--lon", "10", "--json"])
        .arg("--archive-dir")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["hale_class"], "Alpha");
    assert_eq!(json["mcintosh_class"], "Axx");
    assert_eq!(json["hgs_latitude"], -70.0);
    assert_eq!(json["hgs_longitude"], 10.0);
}

#[test]
fn test_classify_far_from_regions_prints_quiet_sun() {
    let dir = srs_dir();

    arcnet()
        .args(["classify", "--time", "2022-11-12", "--lat", "0", "--lon", "-80"])
        .arg("--archive-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("QS"));
}

#[test]
fn test_classify_quiet_produces_no_output() {
    let dir = srs_dir();

    arcnet()
        .args(["classify", "--time", "2022-11-12T09:30:00Z", "--lat", "24"])
        .args(["--lon", "35", "--quiet"])
        .arg("--archive-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_classify_without_report_exits_no_input() {
    let dir = srs_dir();

    arcnet()
        .args(["classify", "--time", "2021-03-01T12:00:00Z", "--lat", "0", "--lon", "0"])
        .arg("--archive-dir")
        .arg(dir.path())
        .assert()
        .code(66)
        .stderr(predicate::str::contains("No SRS report"));
}

// ============================================================================
// Detect Tests
// ============================================================================

#[test]
fn test_detect_json_lists_every_region() {
    let dir = srs_dir();

    let output = arcnet()
        .args(["detect", "--time", "2022-11-12T09:30:00Z", "--json"])
        .arg("--archive-dir")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let detections = json.as_array().unwrap();
    assert_eq!(detections.len(), 3);
    assert_eq!(detections[0]["hale_class"], "Beta");
    assert_eq!(detections[0]["bbox"]["bottom_left"]["latitude"], 19.0);
    assert_eq!(detections[0]["bbox"]["top_right"]["longitude"], 40.0);
}

#[test]
fn test_detect_afternoon_without_next_day_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("20221112SRS.txt"), SAMPLE).unwrap();

    let output = arcnet()
        .args(["detect", "--time", "2022-11-12T13:00:00Z", "--json"])
        .arg("--archive-dir")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[test]
fn test_detect_empty_report() {
    let dir = srs_dir();

    arcnet()
        .args(["detect", "--time", "2022-11-13T03:00:00Z"])
        .arg("--archive-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No active regions"));
}

#[test]
fn test_detect_malformed_report_is_data_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("20221112SRS.txt"),
        ":Product: 20221112SRS.txt\nI.  Regions with Sunspots\nNmbr Location  Lo  Area  Z   LL   NN Mag Type\n3140 N24W35\n",
    )
    .unwrap();

    arcnet()
        .args(["detect", "--time", "2022-11-12T09:30:00Z"])
        .arg("--archive-dir")
        .arg(dir.path())
        .assert()
        .code(65);
}

#[test]
fn test_detect_html_page_is_data_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("20221112SRS.txt"),
        "<html><body>Service maintenance</body></html>\n",
    )
    .unwrap();

    arcnet()
        .args(["classify", "--time", "2022-11-12T09:30:00Z", "--lat", "-70", "--lon", "10"])
        .arg("--archive-dir")
        .arg(dir.path())
        .assert()
        .code(65);
}

#[test]
fn test_detect_empty_file_is_data_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("20221112SRS.txt"), "  \n").unwrap();

    arcnet()
        .args(["detect", "--time", "2022-11-12T09:30:00Z"])
        .arg("--archive-dir")
        .arg(dir.path())
        .assert()
        .code(65);
}
