//! End-to-end tests for the clean pipeline.

use std::fs;
use std::path::Path;

use custnorm_cli::pipeline::run_clean;
use custnorm_cli::types::CleanRequest;
use custnorm_ingest::{IngestOptions, read_dataset};
use custnorm_model::{FieldFailure, NormalizationOptions};
use custnorm_output::OutputOptions;

const MESSY_EXPORT: &str = "\
Name,Email,Phone,City,Registration Date,Total Spent
oscar nilsson,NILSSON_OSCAR @HOTMAIL.com,0046-14294019,goteborg,8/15/25,SEK5204
  anna   BERG ,anna.berg@example.se,070-123 45 67,STHLM,2024-03-01,\"1 234,50 kr\"
oscar nilsson,NILSSON_OSCAR @HOTMAIL.com,0046-14294019,goteborg,8/15/25,SEK5204
erik lund,erik.lund@,NaN,Malmo,someday,free
";

fn request(input: &Path, output: &Path) -> CleanRequest {
    CleanRequest {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        ingest: IngestOptions::default(),
        normalization: NormalizationOptions::default(),
        output_options: OutputOptions::default(),
        dedupe: false,
        dry_run: false,
        report: None,
    }
}

fn write_input(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("messy_customer_data.csv");
    fs::write(&path, MESSY_EXPORT).expect("write input");
    path
}

#[test]
fn clean_writes_normalized_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path());
    let output = dir.path().join("out.csv");

    let result = run_clean(&request(&input, &output)).expect("clean");
    assert_eq!(result.rows_in, 4);
    assert_eq!(result.rows_out(), 4);
    assert_eq!(result.output.as_deref(), Some(output.as_path()));

    let bytes = fs::read(&output).expect("read output");
    assert!(bytes.starts_with(b"\xEF\xBB\xBFsep=;"));

    let written = read_dataset(&output, &IngestOptions::default()).expect("read back");
    assert_eq!(written.headers, result.dataset.headers);
    let first = &written.rows[0];
    assert_eq!(first.value("Name"), "Oscar Nilsson");
    assert_eq!(first.value("Email"), "nilsson_oscar@hotmail.com");
    assert_eq!(first.value("Phone"), "(+46) 14294019");
    assert_eq!(first.value("City"), "Göteborg");
    assert_eq!(first.value("Registration Date"), "2025-08-15");
    assert_eq!(first.value("Total Spent"), "5204.00 SEK");

    let second = &written.rows[1];
    assert_eq!(second.value("Name"), "Anna Berg");
    assert_eq!(second.value("City"), "Stockholm");
    assert_eq!(second.value("Phone"), "(+46) 701234567");
    assert_eq!(second.value("Total Spent"), "1234.50 SEK");
}

#[test]
fn failures_are_reported_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path());
    let output = dir.path().join("out.csv");

    let result = run_clean(&request(&input, &output)).expect("clean");
    let last = &result.dataset.rows[3];
    assert_eq!(last.value("Registration Date"), "someday");
    assert_eq!(last.value("Total Spent"), "0.00 SEK");
    assert_eq!(last.value("Email"), "erik.lund@");
    assert_eq!(last.value("Phone"), "");
    assert_eq!(last.value("City"), "Malmö");

    assert_eq!(result.report.count(FieldFailure::Date), 1);
    assert_eq!(result.report.count(FieldFailure::Amount), 1);
    assert_eq!(result.report.count(FieldFailure::SuspectEmail), 1);
    assert!(result.report.issues.iter().all(|issue| issue.row == 3));
}

#[test]
fn issue_report_snapshot() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path());
    let output = dir.path().join("out.csv");

    let result = run_clean(&request(&input, &output)).expect("clean");
    insta::assert_json_snapshot!(result.report);
}

#[test]
fn dedupe_removes_repeated_customer() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path());
    let output = dir.path().join("out.csv");
    let mut request = request(&input, &output);
    request.dedupe = true;

    let result = run_clean(&request).expect("clean");
    assert_eq!(result.rows_in, 4);
    assert_eq!(result.duplicates_removed, 1);
    assert_eq!(result.rows_out(), 3);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path());
    let output = dir.path().join("out.csv");
    let mut request = request(&input, &output);
    request.dry_run = true;

    let result = run_clean(&request).expect("clean");
    assert!(result.output.is_none());
    assert!(!output.exists());
    assert_eq!(result.rows_out(), 4);
}

#[test]
fn report_lists_issues_as_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path());
    let output = dir.path().join("out.csv");
    let report_path = dir.path().join("issues.json");
    let mut request = request(&input, &output);
    request.report = Some(report_path.clone());

    let result = run_clean(&request).expect("clean");
    assert_eq!(result.report_path.as_deref(), Some(report_path.as_path()));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(json["schema"], "custnorm.issue-report");
    assert_eq!(json["rows_in"], 4);
    assert_eq!(json["error_count"], 2);
    assert_eq!(json["counts"]["DATE"], 1);
    assert_eq!(json["counts"]["AMOUNT"], 1);
    let issues = json["issues"].as_array().expect("issues array");
    assert_eq!(issues.len(), result.report.issues.len());
    assert!(
        issues
            .iter()
            .any(|issue| issue["failure"] == "date" && issue["value"] == "someday")
    );
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("absent.csv");
    let output = dir.path().join("out.csv");

    let error = run_clean(&request(&input, &output)).expect_err("missing file");
    assert!(format!("{error:#}").contains("absent.csv"));
    assert!(!output.exists());
}

#[test]
fn unknown_currency_is_rejected_before_reading() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(dir.path());
    let output = dir.path().join("out.csv");
    let mut request = request(&input, &output);
    request.normalization = NormalizationOptions::default().with_default_currency("XYZ");

    assert!(run_clean(&request).is_err());
    assert!(!output.exists());
}
