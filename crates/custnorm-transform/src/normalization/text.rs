//! Text repair for double-encoded values and whitespace tidying.
//!
//! Mojibake shows up when UTF-8 bytes were decoded as Windows-1252 (or
//! Latin-1) and the result was stored as UTF-8 again: `"ö"` becomes `"Ã¶"`.
//! Repair reverses one such cycle by encoding back to single-byte form and
//! decoding the bytes as UTF-8.

use std::sync::LazyLock;

use custnorm_model::{FieldFailure, FieldOutcome};
use encoding_rs::WINDOWS_1252;
use regex::Regex;

/// A UTF-8 lead byte (`Â`, `Ã`) followed by the Windows-1252 rendering of a
/// continuation byte, or the `â€` prefix of mis-decoded punctuation. A lone
/// `Ã` as in `"SÃO PAULO"` does not match.
static MOJIBAKE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[ÂÃ][\u{80}-\u{BF}€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ]|â€")
        .expect("valid mojibake regex")
});

/// Undo one mis-decode cycle.
///
/// Returns `None` when the value is ASCII, contains characters outside the
/// Windows-1252 repertoire, or its single-byte form is not valid UTF-8. In
/// all those cases the value is left as it was.
pub fn repair_text_once(value: &str) -> Option<String> {
    if value.is_ascii() {
        return None;
    }
    let (bytes, _, unmappable) = WINDOWS_1252.encode(value);
    if unmappable {
        return None;
    }
    let repaired = String::from_utf8(bytes.into_owned()).ok()?;
    (repaired != value).then_some(repaired)
}

/// Repair `value` until it stops changing or `max_passes` is reached.
///
/// A value that still carries a mojibake pair afterwards is returned as-is
/// with a [`FieldFailure::Repair`] flag.
pub fn repair_text(value: &str, max_passes: usize) -> FieldOutcome {
    let mut current = value.to_string();
    for _ in 0..max_passes {
        match repair_text_once(&current) {
            Some(next) => current = next,
            None => break,
        }
    }
    if has_mojibake_markers(&current) {
        FieldOutcome::fallback(current, FieldFailure::Repair)
    } else {
        FieldOutcome::clean(current)
    }
}

pub fn has_mojibake_markers(value: &str) -> bool {
    MOJIBAKE_PATTERN.is_match(value)
}

/// Trim and collapse every whitespace run (including non-breaking spaces)
/// into a single space.
pub fn tidy_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_single_encoding_cycle() {
        assert_eq!(repair_text_once("GÃ¶teborg").as_deref(), Some("Göteborg"));
        assert_eq!(repair_text_once("MalmÃ¶").as_deref(), Some("Malmö"));
    }

    #[test]
    fn repairs_windows_1252_specials() {
        // 0x80 in Windows-1252 is the euro sign, so "€" mis-decodes to "â‚¬".
        assert_eq!(repair_text_once("â‚¬").as_deref(), Some("€"));
    }

    #[test]
    fn clean_text_is_left_alone() {
        assert_eq!(repair_text_once("Göteborg"), None);
        assert_eq!(repair_text_once("plain ascii"), None);
        assert_eq!(repair_text_once("Łódź"), None);
    }

    #[test]
    fn double_encoding_needs_two_passes() {
        let outcome = repair_text("GÃƒÂ¶teborg", 2);
        assert_eq!(outcome, FieldOutcome::clean("Göteborg"));
        let outcome = repair_text("GÃƒÂ¶teborg", 1);
        assert_eq!(outcome.value, "GÃ¶teborg");
        assert_eq!(outcome.failure, Some(FieldFailure::Repair));
    }

    #[test]
    fn lone_lead_letters_are_not_flagged() {
        assert_eq!(repair_text("SÃO PAULO", 2), FieldOutcome::clean("SÃO PAULO"));
        assert_eq!(repair_text("Â", 2), FieldOutcome::clean("Â"));
        assert!(has_mojibake_markers("MalmÃ¶"));
        assert!(has_mojibake_markers("itâ€™s"));
        assert!(!has_mojibake_markers("SÃO PAULO"));
    }

    #[test]
    fn unrepairable_pair_is_flagged() {
        // "Ł" has no Windows-1252 byte, so the value cannot be re-encoded.
        let outcome = repair_text("MalmÃ¶ Ł", 2);
        assert_eq!(outcome.value, "MalmÃ¶ Ł");
        assert_eq!(outcome.failure, Some(FieldFailure::Repair));
    }

    #[test]
    fn tidy_collapses_runs() {
        assert_eq!(tidy_whitespace("  Oscar \u{a0}  Nilsson "), "Oscar Nilsson");
        assert_eq!(tidy_whitespace(""), "");
    }
}
