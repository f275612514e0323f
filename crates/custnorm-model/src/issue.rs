//! Per-field outcomes and the audit report of a normalization run.
//!
//! Field failures are never fatal. A rule that cannot normalize a value
//! returns a fallback together with a [`FieldFailure`] so the row still
//! reaches the output and the failure can be audited afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Why a field fell back instead of reaching its canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFailure {
    /// Text still looks double-encoded after repair; kept as-is.
    Repair,
    /// No accepted date format matched; original string kept.
    Date,
    /// No numeric amount found; zero sentinel emitted.
    Amount,
    /// Email does not look like `local@domain.tld`; kept lowercased.
    SuspectEmail,
    /// Phone digit count outside the plausible range; still formatted.
    PhoneLength,
}

impl FieldFailure {
    pub const ALL: [FieldFailure; 5] = [
        FieldFailure::Repair,
        FieldFailure::Date,
        FieldFailure::Amount,
        FieldFailure::SuspectEmail,
        FieldFailure::PhoneLength,
    ];

    pub fn severity(self) -> IssueSeverity {
        match self {
            FieldFailure::Date | FieldFailure::Amount => IssueSeverity::Error,
            FieldFailure::Repair | FieldFailure::SuspectEmail | FieldFailure::PhoneLength => {
                IssueSeverity::Warning
            }
        }
    }

    /// Short stable code used in reports.
    pub fn code(self) -> &'static str {
        match self {
            FieldFailure::Repair => "REPAIR",
            FieldFailure::Date => "DATE",
            FieldFailure::Amount => "AMOUNT",
            FieldFailure::SuspectEmail => "EMAIL",
            FieldFailure::PhoneLength => "PHONE",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            FieldFailure::Repair => "text still contains encoding artifacts after repair",
            FieldFailure::Date => "no accepted date format matched; original value kept",
            FieldFailure::Amount => "no numeric amount found; zero sentinel written",
            FieldFailure::SuspectEmail => "email address looks malformed",
            FieldFailure::PhoneLength => "phone number has an unusual digit count",
        }
    }
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Result of applying one rule to one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    pub value: String,
    pub failure: Option<FieldFailure>,
}

impl FieldOutcome {
    pub fn clean(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            failure: None,
        }
    }

    pub fn fallback(value: impl Into<String>, failure: FieldFailure) -> Self {
        Self {
            value: value.into(),
            failure: Some(failure),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failure.is_none()
    }
}

/// A field that fell back during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Zero-based row index in the input dataset.
    pub row: usize,
    /// Header of the affected column.
    pub column: String,
    pub failure: FieldFailure,
    /// Raw input value.
    pub value: String,
}

impl FieldIssue {
    pub fn severity(&self) -> IssueSeverity {
        self.failure.severity()
    }
}

/// All field issues found while normalizing one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
    /// Rows processed.
    pub rows: usize,
    pub issues: Vec<FieldIssue>,
}

impl NormalizationReport {
    pub fn count(&self, failure: FieldFailure) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.failure == failure)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn issues_for<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a FieldIssue> {
        self.issues.iter().filter(move |issue| issue.column == column)
    }

    /// Issue counts keyed by failure kind; kinds with no issues are omitted.
    pub fn counts_by_failure(&self) -> BTreeMap<FieldFailure, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.failure).or_insert(0) += 1;
        }
        counts
    }
}
