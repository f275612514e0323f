//! Person name casing.
//!
//! Tokens are split on whitespace only. Hyphenated and apostrophe names are
//! a single token, so `"anna-karin"` becomes `"Anna-karin"`.

/// Capitalize every whitespace-separated token and join with single spaces.
pub fn normalize_name(value: &str) -> String {
    value
        .split_whitespace()
        .map(capitalize_token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First character uppercase, the rest lowercase.
pub fn capitalize_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    if let Some(first) = chars.next() {
        push_upper(&mut out, first);
        out.extend(chars.flat_map(char::to_lowercase));
    }
    out
}

/// Push the single-character uppercase form of `ch`. Characters that expand
/// when uppercased (`ß` to `SS`) are kept as they are, so casing a value
/// twice gives the same result.
pub(crate) fn push_upper(out: &mut String, ch: char) {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => out.push(single),
        _ => out.push(ch),
    }
}
