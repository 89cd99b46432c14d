//! Integration tests for the `pairs` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the analyze and
//! formats subcommands through the actual binary, including stdin piping,
//! file I/O, intake validation and the engine's error conditions.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: absolute path of a fixture file.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: the binary under test.
fn pairs() -> Command {
    Command::cargo_bin("pairs").unwrap()
}

/// Helper: run `pairs analyze` with the given args and parse stdout as JSON.
fn analyze_json(args: &[&str]) -> Value {
    let output = pairs()
        .arg("analyze")
        .args(args)
        .output()
        .expect("pairs should run");
    assert!(
        output.status.success(),
        "pairs analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Analyze: successful runs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn analyze_file_reports_longest_pair() {
    let json = analyze_json(&["-i", &fixture("assignments.csv"), "--as-of", "2025-01-01"]);

    assert_eq!(json["employee1Id"], 143);
    assert_eq!(json["employee2Id"], 218);
    assert_eq!(json["totalDaysWorked"], 35);
    assert_eq!(json["projects"].as_array().unwrap().len(), 1);
    assert_eq!(json["projects"][0]["projectId"], 12);
    assert_eq!(json["projects"][0]["dateFrom"], "2013-12-01");
    assert_eq!(json["projects"][0]["dateTo"], "2014-01-05");
}

#[test]
fn analyze_stdin_to_stdout() {
    let input = "1,10,2024-01-01,2024-01-10\n2,10,2024-01-05,2024-01-15\n";

    pairs()
        .args(["analyze", "--compact"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""totalDaysWorked":5"#));
}

#[test]
fn analyze_accepts_mixed_date_layouts() {
    let json = analyze_json(&["-i", &fixture("mixed_formats.csv")]);
    assert_eq!(json["totalDaysWorked"], 5);
}

#[test]
fn analyze_with_custom_delimiter() {
    let json = analyze_json(&["-i", &fixture("semicolon.csv"), "--delimiter", ";"]);
    assert_eq!(json["totalDaysWorked"], 5);
}

#[test]
fn analyze_open_ended_uses_as_of() {
    let json = analyze_json(&["-i", &fixture("open_ended.csv"), "--as-of", "2024-03-01"]);

    assert_eq!(json["totalDaysWorked"], 20);
    assert_eq!(json["projects"][0]["dateTo"], "2024-03-01");
}

#[test]
fn analyze_as_of_accepts_other_layouts() {
    let json = analyze_json(&["-i", &fixture("open_ended.csv"), "--as-of", "01.03.2024"]);
    assert_eq!(json["totalDaysWorked"], 20);
}

#[test]
fn analyze_tie_break_first_discovered_by_default() {
    let json = analyze_json(&["-i", &fixture("ties.csv")]);
    assert_eq!(json["employee1Id"], 3);
    assert_eq!(json["employee2Id"], 4);
}

#[test]
fn analyze_tie_break_lowest_pair() {
    let json = analyze_json(&["-i", &fixture("ties.csv"), "--tie-break", "lowest"]);
    assert_eq!(json["employee1Id"], 1);
    assert_eq!(json["employee2Id"], 2);
}

#[test]
fn analyze_top_lists_ranking() {
    let json = analyze_json(&[
        "-i",
        &fixture("assignments.csv"),
        "--as-of",
        "2025-01-01",
        "--top",
        "2",
    ]);

    assert_eq!(json["longest"]["totalDaysWorked"], 35);
    let ranking = json["ranking"].as_array().unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0], json["longest"]);
    assert_eq!(ranking[1]["employee1Id"], 143);
    assert_eq!(ranking[1]["employee2Id"], 301);
    assert_eq!(ranking[1]["totalDaysWorked"], 30);
}

#[test]
fn analyze_top_larger_than_pair_count() {
    let json = analyze_json(&["-i", &fixture("ties.csv"), "--top", "10"]);
    assert_eq!(json["ranking"].as_array().unwrap().len(), 2);
}

#[test]
fn analyze_pretty_by_default_compact_on_request() {
    let path = fixture("mixed_formats.csv");
    let args = ["analyze", "-i", path.as_str()];

    let pretty = pairs().args(args).output().unwrap();
    assert!(String::from_utf8_lossy(&pretty.stdout).contains("\n  \"employee1Id\""));

    let compact = pairs().args(args).arg("--compact").output().unwrap();
    let text = String::from_utf8_lossy(&compact.stdout);
    assert_eq!(text.trim_end().lines().count(), 1);
}

#[test]
fn analyze_file_to_file() {
    let output_path = std::env::temp_dir().join("pairs-test-analyze-output.json");
    let _ = std::fs::remove_file(&output_path);

    pairs()
        .args(["analyze", "-i"])
        .arg(fixture("mixed_formats.csv"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let json: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["totalDaysWorked"], 5);

    let _ = std::fs::remove_file(&output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Analyze: engine error conditions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn header_only_file_is_empty_input() {
    pairs()
        .args(["analyze", "-i"])
        .arg(fixture("header_only.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data rows"));
}

#[test]
fn malformed_file_has_no_valid_records() {
    pairs()
        .args(["analyze", "-i"])
        .arg(fixture("malformed.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no valid employee records"));
}

#[test]
fn disjoint_file_has_no_overlap() {
    pairs()
        .args(["analyze", "-i"])
        .arg(fixture("no_overlap.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no overlapping work periods"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Analyze: intake validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn zero_byte_file_rejected() {
    pairs()
        .args(["analyze", "-i"])
        .arg(fixture("empty.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("the input is empty"));
}

#[test]
fn empty_stdin_rejected() {
    pairs()
        .arg("analyze")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("the input is empty"));
}

#[test]
fn non_csv_extension_rejected() {
    pairs()
        .args(["analyze", "-i"])
        .arg(fixture("assignments.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a CSV file"));
}

#[test]
fn oversized_input_rejected() {
    pairs()
        .args(["analyze", "-i"])
        .arg(fixture("assignments.csv"))
        .args(["--max-bytes", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("size limit of 10 bytes"));
}

#[test]
fn invalid_utf8_row_dropped_without_aborting() {
    // The last row has a 0xFF byte inside its project id.
    let json = analyze_json(&["-i", &fixture("invalid_utf8.csv"), "--as-of", "2025-01-01"]);

    assert_eq!(json["employee1Id"], 1);
    assert_eq!(json["employee2Id"], 2);
    assert_eq!(json["totalDaysWorked"], 5);
}

#[test]
fn missing_file_fails() {
    pairs()
        .args(["analyze", "-i", "/nonexistent/path/assignments.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_as_of_rejected() {
    pairs()
        .args(["analyze", "--as-of", "tomorrow"])
        .write_stdin("1,10,2024-01-01\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn top_zero_rejected() {
    pairs()
        .args(["analyze", "--top", "0"])
        .write_stdin("1,10,2024-01-01\n")
        .assert()
        .failure();
}

#[test]
fn multi_char_delimiter_rejected() {
    pairs()
        .args(["analyze", "--delimiter", "ab"])
        .write_stdin("1,10,2024-01-01\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("single ASCII character"));
}

#[test]
fn missing_subcommand_fails() {
    pairs().assert().failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Formats subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn formats_lists_layouts_in_priority_order() {
    let output = pairs().arg("formats").output().unwrap();
    assert!(output.status.success());

    let text = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "YYYY-MM-DD");
    assert_eq!(lines[1], "MM/DD/YYYY");
    assert_eq!(lines[7], "MM.DD.YYYY");
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbose_logs_to_stderr_and_keeps_stdout_json() {
    let output = pairs()
        .args(["analyze", "-v", "--compact", "-i"])
        .arg(fixture("assignments.csv"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("normalized assignment rows"), "stderr: {}", stderr);

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should stay JSON");
    assert_eq!(json["employee1Id"], 143);
}
