//! Email address normalization.

use std::sync::LazyLock;

use custnorm_model::{FieldFailure, FieldOutcome};
use regex::Regex;

/// `local@label.label.tld` over the lowercase ASCII subset seen in exports.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@(?:[a-z0-9\-]+\.)+[a-z]{2,}$").expect("valid email regex")
});

/// Remove all whitespace and lowercase the address.
///
/// Malformed addresses are never rejected; they come back lowercased with a
/// [`FieldFailure::SuspectEmail`] flag so they can be reviewed.
pub fn normalize_email(value: &str) -> FieldOutcome {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if normalized.is_empty() || is_plausible_email(&normalized) {
        FieldOutcome::clean(normalized)
    } else {
        FieldOutcome::fallback(normalized, FieldFailure::SuspectEmail)
    }
}

/// Structural sanity check for an already-normalized address.
pub fn is_plausible_email(value: &str) -> bool {
    if value.contains("..") || !EMAIL_REGEX.is_match(value) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    ![local, domain]
        .iter()
        .any(|part| part.starts_with('.') || part.ends_with('.'))
}
