//! Integration tests for the CLI commands

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cr_book.json");
const MALFORMED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/malformed.json");

#[test]
fn test_version_command() {
    let mut cmd = cargo_bin_cmd!("cr-extract");
    cmd.arg("version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("cr-extract "));
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("cr-extract");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("cr-extract "));
}

#[test]
fn test_version_short_flag() {
    let mut cmd = cargo_bin_cmd!("cr-extract");
    cmd.arg("-V");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("cr-extract "));
}

#[test]
fn test_extract_json_report() {
    let mut cmd = cargo_bin_cmd!("cr-extract");
    cmd.args(["extract", FIXTURE]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(report["fuzz_threshold"], 80);
    assert_eq!(report["token_count"], 33);
    assert_eq!(report["fields"]["Registration No."], "CAB-4512");
    assert_eq!(report["fields"]["Chassis No."], "NZE121-3054871");
    assert_eq!(
        report["fields"]["Absolute Owner"],
        serde_json::json!(["PEOPLES LEASING PLC", "NO 1161, MARADANA ROAD", "COLOMBO 08"])
    );
    assert!(report["generated_at"].is_string());
}

#[test]
fn test_extract_form_output() {
    let mut cmd = cargo_bin_cmd!("cr-extract");
    cmd.args(["extract", FIXTURE, "--format", "form"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Make:\n  TOYOTA\n"))
        .stdout(predicate::str::contains("Country of Origin:\nModel:\n  AXIO\n"))
        .stdout(predicate::str::contains(
            "Current Owner/Address/ID.No.:\n  K.A. PERERA\n  12 LAKE ROAD, COLOMBO 05\n",
        ));
}

#[test]
fn test_extract_from_stdin() {
    let mut cmd = cargo_bin_cmd!("cr-extract");
    cmd.args(["extract", "-"])
        .write_stdin(std::fs::read(FIXTURE).unwrap());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"Make\": \"TOYOTA\""));
}

#[test]
fn test_extract_reports_malformed_detections() {
    let mut cmd = cargo_bin_cmd!("cr-extract");
    cmd.args(["extract", MALFORMED]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(report["token_count"], 2);
    assert_eq!(report["rejected_detections"].as_array().unwrap().len(), 2);
    assert_eq!(report["rejected_detections"][0]["index"], 1);
    assert_eq!(report["fields"]["Registration No."], "WP CAB-4512");
    assert!(report["fields"]["Make"].is_null());
}

#[test]
fn test_extract_null_dump_is_all_blank() {
    let mut cmd = cargo_bin_cmd!("cr-extract");
    cmd.args(["extract", "-"]).write_stdin("[null]");

    let output = cmd.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(report["token_count"], 0);
    let fields = report["fields"].as_object().unwrap();
    assert_eq!(fields.len(), 14);
    assert_eq!(fields["Absolute Owner"], serde_json::json!([null, null, null]));
    assert!(fields["Engine No"].is_null());
}

#[test]
fn test_threshold_flag_overrides_config() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, r#"{{"extractor": {{"fuzz_threshold": 100}}}}"#).unwrap();

    // Threshold 100 from the file: "Registration No." never scores 100 against the stripped label
    let mut strict = cargo_bin_cmd!("cr-extract");
    strict.args(["extract", FIXTURE, "--config"]).arg(config.path());
    let output = strict.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(report["fields"]["Registration No."].is_null());

    let mut relaxed = cargo_bin_cmd!("cr-extract");
    relaxed
        .args(["extract", FIXTURE, "--fuzz-threshold", "80", "--config"])
        .arg(config.path());
    let output = relaxed.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["fields"]["Registration No."], "CAB-4512");
}

#[test]
fn test_fields_command_lists_table() {
    let mut cmd = cargo_bin_cmd!("cr-extract");
    cmd.arg("fields");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Chassis No.\tnext_line\t1\n"))
        .stdout(predicate::str::contains("Absolute Owner\tnext_line\t[0, 1, 2]\n"));
}

#[test]
fn test_missing_input_fails() {
    let mut cmd = cargo_bin_cmd!("cr-extract");
    cmd.args(["extract", "no/such/dump.json"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_invalid_config_fails() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, r#"{{"extractor": {{"band_tolerance": -3}}}}"#).unwrap();

    let mut cmd = cargo_bin_cmd!("cr-extract");
    cmd.args(["extract", FIXTURE, "--config"]).arg(config.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("band_tolerance"));
}

#[test]
fn test_page_flag_selects_page() {
    let mut dump = tempfile::NamedTempFile::new().unwrap();
    write!(
        dump,
        r#"[null, [
            [[[30, 11], [222, 11], [222, 29], [30, 29]], ["Registration No.", 0.97]],
            [[[30, 41], [126, 41], [126, 59], [30, 59]], ["CAB-4512", 0.93]]
        ]]"#
    )
    .unwrap();

    let mut first = cargo_bin_cmd!("cr-extract");
    first.args(["extract"]).arg(dump.path());
    let output = first.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["token_count"], 0);
    assert!(report["fields"]["Registration No."].is_null());

    let mut second = cargo_bin_cmd!("cr-extract");
    second.args(["extract", "--page", "1"]).arg(dump.path());
    let output = second.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["token_count"], 2);
    assert_eq!(report["fields"]["Registration No."], "CAB-4512");
}

#[test]
fn test_exclude_label_token_flag() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(
        config,
        r#"{{"fields": [{{"label": "Make", "band": "same_line", "value_at": 0}}]}}"#
    )
    .unwrap();
    let dump = r#"[[
        [[[30, 11], [90, 11], [90, 29], [30, 29]], ["Make", 0.97]],
        [[[200, 11], [290, 11], [290, 29], [200, 29]], ["TOYOTA", 0.95]]
    ]]"#;

    let mut with_label = cargo_bin_cmd!("cr-extract");
    with_label
        .args(["extract", "-", "--config"])
        .arg(config.path())
        .write_stdin(dump);
    let output = with_label.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["fields"]["Make"], "Make");

    let mut without_label = cargo_bin_cmd!("cr-extract");
    without_label
        .args(["extract", "-", "--exclude-label-token", "--config"])
        .arg(config.path())
        .write_stdin(dump);
    let output = without_label.assert().success().get_output().stdout.clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["fields"]["Make"], "TOYOTA");
    assert_eq!(report["fields"].as_object().unwrap().len(), 1);
}
