//! Phone number formatting with a fixed country calling code.

use custnorm_model::{FieldFailure, FieldOutcome};

/// Plausible total digit count (country code included).
const PLAUSIBLE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

/// National significant number: digits with any `00`/`+` country prefix and
/// the domestic trunk `0` removed.
///
/// Only one country prefix is stripped and no national number keeps a
/// leading zero, so feeding an already formatted number back in yields the
/// same national number.
pub fn national_digits(value: &str, country_code: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    let mut rest = digits.as_str();
    if let Some(stripped) = rest
        .strip_prefix("00")
        .and_then(|r| r.strip_prefix(country_code))
    {
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix(country_code) {
        rest = stripped;
    }
    rest.trim_start_matches('0').to_string()
}

/// Format as `"(+<cc>) <national digits>"`.
///
/// Values without any digits come back empty. Lengths are not enforced; an
/// unusual digit count is flagged with [`FieldFailure::PhoneLength`]. A value
/// that is nothing but a country prefix has no national number and comes
/// back empty with the same flag.
pub fn normalize_phone(value: &str, country_code: &str) -> FieldOutcome {
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return FieldOutcome::clean(String::new());
    }
    let national = national_digits(value, country_code);
    if national.is_empty() {
        return FieldOutcome::fallback(String::new(), FieldFailure::PhoneLength);
    }
    let formatted = format!("(+{country_code}) {national}");
    let total = country_code.len() + national.len();
    if PLAUSIBLE_DIGITS.contains(&total) {
        FieldOutcome::clean(formatted)
    } else {
        FieldOutcome::fallback(formatted, FieldFailure::PhoneLength)
    }
}
