//! Date parsing across ambiguous input layouts.
//!
//! Formats are tried in the order of [`DATE_FORMATS`] and the first one that
//! parses wins. That order is the disambiguation rule for values such as
//! `"08/05/25"`:
//!
//! 1. ISO layouts first, so normalized values pass through unchanged.
//! 2. Month-first before day-first for slash dates.
//! 3. Two-digit years before four-digit years for the same layout.
//!
//! Two-digit years follow chrono's `%y` pivot: 00-68 is 2000-2068 and
//! 69-99 is 1969-1999. A parse that lands outside the configured year window
//! counts as no match, which also stops a four-digit pattern from reading
//! `"12/11/10"` as the year 12.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use custnorm_model::{FieldFailure, FieldOutcome};

/// One accepted input layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    /// chrono format string.
    pub pattern: &'static str,
    /// Sample input, for help output and docs.
    pub example: &'static str,
}

impl DateFormat {
    pub const fn new(pattern: &'static str, example: &'static str) -> Self {
        Self { pattern, example }
    }
}

/// Accepted input layouts in priority order.
pub const DATE_FORMATS: &[DateFormat] = &[
    DateFormat::new("%Y-%m-%d", "2025-08-15"),
    DateFormat::new("%Y/%m/%d", "2025/08/15"),
    DateFormat::new("%m/%d/%y", "8/15/25"),
    DateFormat::new("%m/%d/%Y", "8/15/2025"),
    DateFormat::new("%d/%m/%y", "15/8/25"),
    DateFormat::new("%d/%m/%Y", "15/08/2025"),
    DateFormat::new("%d-%m-%y", "15-08-25"),
    DateFormat::new("%d-%m-%Y", "15-08-2025"),
    DateFormat::new("%d.%m.%Y", "15.08.2025"),
    DateFormat::new("%d %b %Y", "15 Aug 2025"),
    DateFormat::new("%b %d, %Y", "Aug 15, 2025"),
    DateFormat::new("%d-%b-%Y", "15-Aug-2025"),
];

/// Parse `value` with the first matching format whose year is in `years`.
pub fn parse_date(
    value: &str,
    years: &RangeInclusive<i32>,
) -> Option<(NaiveDate, &'static DateFormat)> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(trimmed, format.pattern)
            .ok()
            .filter(|date| years.contains(&date.year()))
            .map(|date| (date, format))
    })
}

/// Normalize to `YYYY-MM-DD`.
///
/// Unparseable values are returned trimmed but otherwise unchanged, flagged
/// with [`FieldFailure::Date`]. Empty input stays empty.
pub fn normalize_date(value: &str, years: &RangeInclusive<i32>) -> FieldOutcome {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldOutcome::clean(String::new());
    }
    match parse_date(trimmed, years) {
        Some((date, _)) => FieldOutcome::clean(date.format("%Y-%m-%d").to_string()),
        None => FieldOutcome::fallback(trimmed, FieldFailure::Date),
    }
}
