//! Amount and currency parsing.
//!
//! Inputs mix a currency marker and a number in any order and spacing:
//! `"SEK5204"`, `"5204 SEK"`, `"5,204.00SEK"`, `"1.234,50 €"`. A character
//! class scan separates the two parts.
//!
//! The last `.` or `,` is the decimal point when exactly two digits follow
//! it. Every other separator, space or apostrophe between digits is
//! thousands grouping and dropped. Amounts are held in integer minor units.

use std::fmt;

use custnorm_model::{FieldFailure, FieldOutcome, KNOWN_CURRENCIES};

/// Currency symbols and words that stand in for a code.
const CURRENCY_ALIASES: &[(&str, &str)] = &[
    ("KR", "SEK"),
    ("KRONOR", "SEK"),
    ("$", "USD"),
    ("€", "EUR"),
    ("£", "GBP"),
];

/// Digits accepted before the decimal point; more would overflow `i64` minor units.
const MAX_INTEGER_DIGITS: usize = 16;

/// A parsed amount in minor units (1/100) with its currency code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAmount {
    pub minor_units: i64,
    pub currency: String,
}

impl fmt::Display for ParsedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        write!(f, "{sign}{}.{:02} {}", abs / 100, abs % 100, self.currency)
    }
}

/// First recognizable currency marker in reading order.
pub fn detect_currency(value: &str) -> Option<&'static str> {
    let mut word = String::new();
    for ch in value.chars().chain(std::iter::once(' ')) {
        if ch.is_alphabetic() {
            word.extend(ch.to_uppercase());
            continue;
        }
        if !word.is_empty() {
            if let Some(code) = currency_for_token(&word) {
                return Some(code);
            }
            word.clear();
        }
        if !ch.is_ascii_alphanumeric() && !ch.is_whitespace() {
            let mut buf = [0u8; 4];
            if let Some(code) = currency_for_token(ch.encode_utf8(&mut buf)) {
                return Some(code);
            }
        }
    }
    None
}

fn currency_for_token(token: &str) -> Option<&'static str> {
    KNOWN_CURRENCIES
        .iter()
        .copied()
        .find(|code| *code == token)
        .or_else(|| {
            CURRENCY_ALIASES
                .iter()
                .find(|(alias, _)| *alias == token)
                .map(|(_, code)| *code)
        })
}

/// Extract the numeric part of `value` as minor units.
///
/// Returns `None` when there are no digits or the number is too large. A
/// `-` directly before the first digit, or an opening `(` before it with
/// only spaces between, makes the amount negative. A dash set apart from
/// the number, as in `"SEK - 5204"`, is a separator.
pub fn parse_minor_units(value: &str) -> Option<i64> {
    let first = value.find(|c: char| c.is_ascii_digit())?;
    let last = value.rfind(|c: char| c.is_ascii_digit())?;
    let prefix = &value[..first];
    let negative = prefix.ends_with('-') || prefix.trim_end().ends_with('(');

    let compact: Vec<char> = value[first..=last]
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ','))
        .collect();
    let decimal_at = compact
        .iter()
        .rposition(|c| matches!(c, '.' | ','))
        .filter(|idx| compact.len() - idx - 1 == 2);

    let (integer, fraction): (String, String) = match decimal_at {
        Some(idx) => (
            compact[..idx].iter().filter(|c| c.is_ascii_digit()).collect(),
            compact[idx + 1..].iter().collect(),
        ),
        None => (
            compact.iter().filter(|c| c.is_ascii_digit()).collect(),
            String::new(),
        ),
    };

    let integer = integer.trim_start_matches('0');
    if integer.len() > MAX_INTEGER_DIGITS {
        return None;
    }
    let whole: i64 = if integer.is_empty() {
        0
    } else {
        integer.parse().ok()?
    };
    let cents: i64 = if fraction.is_empty() {
        0
    } else {
        fraction.parse().ok()?
    };
    let minor = whole.checked_mul(100)?.checked_add(cents)?;
    Some(if negative { -minor } else { minor })
}

/// Parse currency and amount, falling back to `default_currency`.
pub fn parse_amount(value: &str, default_currency: &str) -> Option<ParsedAmount> {
    let minor_units = parse_minor_units(value)?;
    let currency = detect_currency(value).unwrap_or(default_currency).to_string();
    Some(ParsedAmount {
        minor_units,
        currency,
    })
}

/// Format as `"<amount with two decimals> <CUR>"`.
///
/// Empty input stays empty. Input without a usable number becomes the
/// sentinel `"0.00 <CUR>"` flagged with [`FieldFailure::Amount`].
pub fn normalize_amount(value: &str, default_currency: &str) -> FieldOutcome {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldOutcome::clean(String::new());
    }
    match parse_amount(trimmed, default_currency) {
        Some(amount) => FieldOutcome::clean(amount.to_string()),
        None => {
            let currency = detect_currency(trimmed).unwrap_or(default_currency);
            FieldOutcome::fallback(format!("0.00 {currency}"), FieldFailure::Amount)
        }
    }
}
