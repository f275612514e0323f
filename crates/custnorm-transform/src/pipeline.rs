//! Row pipeline: applies the field rules to every value of a dataset.
//!
//! Every value is repaired and whitespace-tidied first. Values in a
//! recognized column then go through that column's rule. Rows are never
//! dropped and no column is added or removed; a field that cannot be
//! normalized keeps a fallback value and is recorded in the report.

use std::ops::RangeInclusive;

use custnorm_model::{
    Column, Dataset, FieldFailure, FieldIssue, FieldOutcome, NormalizationOptions,
    NormalizationReport, Row, redact_value,
};
use tracing::{debug, info, info_span, trace, warn};

use crate::normalization::{
    normalize_amount, normalize_city, normalize_date, normalize_email, normalize_name,
    normalize_phone, repair_text, tidy_whitespace,
};

/// One normalized value and every failure raised on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedField {
    pub value: String,
    pub failures: Vec<FieldFailure>,
}

/// Cleaned dataset plus the audit report of the run.
#[derive(Debug, Clone)]
pub struct NormalizedDataset {
    pub dataset: Dataset,
    pub report: NormalizationReport,
}

/// Applies the field rules with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizationOptions,
}

impl Normalizer {
    /// Build a normalizer after validating `options`.
    pub fn new(options: NormalizationOptions) -> custnorm_model::Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &NormalizationOptions {
        &self.options
    }

    fn year_window(&self) -> RangeInclusive<i32> {
        self.options.min_year..=self.options.max_year
    }

    /// Normalize a single value. `column` is `None` for pass-through columns.
    pub fn normalize_field(&self, column: Option<Column>, raw: &str) -> NormalizedField {
        let mut failures = Vec::new();
        let repaired = repair_text(raw, self.options.repair_passes);
        failures.extend(repaired.failure);
        let tidy = tidy_whitespace(&repaired.value);

        let outcome = match column {
            Some(Column::Name) => FieldOutcome::clean(normalize_name(&tidy)),
            Some(Column::Email) => normalize_email(&tidy),
            Some(Column::Phone) => normalize_phone(&tidy, &self.options.country_code),
            Some(Column::City) => FieldOutcome::clean(normalize_city(&tidy)),
            Some(Column::Date) => normalize_date(&tidy, &self.year_window()),
            Some(Column::AmountCurrency) => {
                normalize_amount(&tidy, &self.options.default_currency)
            }
            None => FieldOutcome::clean(tidy),
        };
        failures.extend(outcome.failure);
        NormalizedField {
            value: outcome.value,
            failures,
        }
    }

    /// Normalize every value of `row`. `index` is the row position used in
    /// issue records.
    pub fn normalize_row(&self, index: usize, row: &Row) -> (Row, Vec<FieldIssue>) {
        let mut issues = Vec::new();
        let mut cleaned = Row::new();
        for (header, raw) in row.iter() {
            let field = self.normalize_field(Column::from_header(header), raw);
            for failure in field.failures {
                trace!(
                    row = index,
                    column = header,
                    failure = %failure,
                    value = redact_value(raw),
                    "field fell back"
                );
                issues.push(FieldIssue {
                    row: index,
                    column: header.to_string(),
                    failure,
                    value: raw.to_string(),
                });
            }
            cleaned.set(header, field.value);
        }
        (cleaned, issues)
    }

    /// Normalize every row, preserving order, row count and column set.
    pub fn normalize_dataset(&self, dataset: &Dataset) -> NormalizedDataset {
        let span = info_span!("normalize", rows = dataset.len());
        let _guard = span.enter();

        for (header, role) in dataset.column_roles() {
            match role {
                Some(column) => debug!(header, role = %column, "column recognized"),
                None => debug!(header, "pass-through column"),
            }
        }

        let mut report = NormalizationReport {
            rows: dataset.len(),
            issues: Vec::new(),
        };
        let mut rows = Vec::with_capacity(dataset.len());
        for (index, row) in dataset.rows.iter().enumerate() {
            let (cleaned, issues) = self.normalize_row(index, row);
            rows.push(cleaned);
            report.issues.extend(issues);
        }

        for (failure, count) in report.counts_by_failure() {
            warn!(code = failure.code(), count, "{}", failure.message());
        }
        info!(
            rows = rows.len(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "normalization complete"
        );

        NormalizedDataset {
            dataset: Dataset::with_rows(dataset.headers.clone(), rows),
            report,
        }
    }
}
