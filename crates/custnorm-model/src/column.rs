//! Recognized column roles and header resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column roles the normalizer knows how to clean.
///
/// Any header that does not resolve to one of these is a pass-through column:
/// it only gets text repair and whitespace tidying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Email,
    Phone,
    City,
    Date,
    AmountCurrency,
}

impl Column {
    /// All roles, in canonical output order.
    pub const ALL: [Column; 6] = [
        Column::Name,
        Column::Email,
        Column::Phone,
        Column::City,
        Column::Date,
        Column::AmountCurrency,
    ];

    /// Canonical header name.
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Email => "email",
            Column::Phone => "phone",
            Column::City => "city",
            Column::Date => "date",
            Column::AmountCurrency => "amount_currency",
        }
    }

    /// Resolve a raw header to a column role.
    ///
    /// Matching is case-insensitive, ignores surrounding whitespace, and
    /// treats spaces and hyphens as underscores, so `"Registration Date"`
    /// and `"registration-date"` both resolve to [`Column::Date`].
    pub fn from_header(header: &str) -> Option<Column> {
        let key = header_key(header);
        match key.as_str() {
            "name" | "full_name" | "customer_name" => Some(Column::Name),
            "email" | "e_mail" | "email_address" => Some(Column::Email),
            "phone" | "phone_number" | "telephone" => Some(Column::Phone),
            "city" | "town" => Some(Column::City),
            "date" | "registration_date" | "signup_date" => Some(Column::Date),
            "amount_currency" | "amount" | "total_spent" | "price" => {
                Some(Column::AmountCurrency)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn header_key(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    let mut last_underscore = false;
    for ch in header.trim().trim_matches('\u{feff}').chars() {
        let mapped = match ch {
            ' ' | '-' | '_' | '\t' => '_',
            other => other.to_ascii_lowercase(),
        };
        if mapped == '_' {
            if last_underscore {
                continue;
            }
            last_underscore = true;
        } else {
            last_underscore = false;
        }
        key.push(mapped);
    }
    key
}
