//! Clean pipeline with explicit stages.
//!
//! 1. **Ingest**: read and decode the input table
//! 2. **Normalize**: apply the field rules to every row
//! 3. **Dedupe**: optionally drop exact duplicate rows
//! 4. **Output**: write the cleaned table and the optional JSON report

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, info_span};

use custnorm_ingest::read_dataset;
use custnorm_model::{Dataset, FieldIssue, NormalizationReport};
use custnorm_output::write_dataset;
use custnorm_transform::Normalizer;

use crate::dedupe::dedupe_rows;
use crate::types::{CleanRequest, CleanResult};

const REPORT_SCHEMA: &str = "custnorm.issue-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// `<stem>_cleaned.csv` next to `input`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_cleaned.csv"))
}

pub fn run_clean(request: &CleanRequest) -> Result<CleanResult> {
    let span = info_span!("clean", input = %request.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let normalizer =
        Normalizer::new(request.normalization.clone()).context("invalid normalization options")?;
    debug!(
        currency = %normalizer.options().default_currency,
        country_code = %normalizer.options().country_code,
        "normalization options"
    );

    let source = ingest(request)?;
    let rows_in = source.len();

    let normalized = normalizer.normalize_dataset(&source);
    let mut dataset = normalized.dataset;
    let report = normalized.report;

    let duplicates_removed = if request.dedupe {
        info_span!("dedupe").in_scope(|| {
            let removed = dedupe_rows(&mut dataset);
            info!(removed, "duplicate rows removed");
            removed
        })
    } else {
        0
    };

    let output = if request.dry_run {
        info!("dry run, cleaned file not written");
        None
    } else {
        write_output(&request.output, &dataset, request)?;
        Some(request.output.clone())
    };

    let mut result = CleanResult {
        input: request.input.clone(),
        output,
        report_path: None,
        rows_in,
        duplicates_removed,
        dataset,
        report,
    };
    if let Some(path) = &request.report {
        write_issue_report(path, &result)
            .with_context(|| format!("write report {}", path.display()))?;
        result.report_path = Some(path.clone());
    }

    info!(
        rows_in,
        rows_out = result.rows_out(),
        errors = result.report.error_count(),
        warnings = result.report.warning_count(),
        duration_ms = start.elapsed().as_millis(),
        "clean complete"
    );
    Ok(result)
}

fn ingest(request: &CleanRequest) -> Result<Dataset> {
    let span = info_span!("ingest");
    let _guard = span.enter();
    let path = &request.input;
    read_dataset(path, &request.ingest).with_context(|| format!("read {}", path.display()))
}

fn write_output(path: &Path, dataset: &Dataset, request: &CleanRequest) -> Result<()> {
    let span = info_span!("output", path = %path.display());
    let _guard = span.enter();
    write_dataset(path, dataset, &request.output_options)
        .with_context(|| format!("write {}", path.display()))
}

#[derive(Serialize)]
struct IssueReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    input: String,
    output: Option<String>,
    rows_in: usize,
    rows_out: usize,
    duplicates_removed: usize,
    error_count: usize,
    warning_count: usize,
    counts: BTreeMap<&'static str, usize>,
    issues: &'a [FieldIssue],
}

fn issue_report_payload(result: &CleanResult) -> IssueReportPayload<'_> {
    let report: &NormalizationReport = &result.report;
    IssueReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        input: result.input.display().to_string(),
        output: result
            .output
            .as_ref()
            .map(|path| path.display().to_string()),
        rows_in: result.rows_in,
        rows_out: result.rows_out(),
        duplicates_removed: result.duplicates_removed,
        error_count: report.error_count(),
        warning_count: report.warning_count(),
        counts: report
            .counts_by_failure()
            .into_iter()
            .map(|(failure, count)| (failure.code(), count))
            .collect(),
        issues: &report.issues,
    }
}

/// Write the run's field issues as pretty-printed JSON.
pub fn write_issue_report(path: &Path, result: &CleanResult) -> Result<()> {
    let json = serde_json::to_string_pretty(&issue_report_payload(result))?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), issues = result.report.issues.len(), "issue report written");
    Ok(())
}
