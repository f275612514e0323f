//! Normalization rules for customer record fields.
//!
//! Each rule is a pure function over one value. Rules that can fail return a
//! [`FieldOutcome`](custnorm_model::FieldOutcome) carrying the fallback value.
//!
//! - **text**: mojibake repair and whitespace tidying (every column)
//! - **name**: per-token capitalization
//! - **email**: whitespace removal and lowercasing
//! - **phone**: `(+46) <national number>` display form
//! - **city**: static lookup of known spellings with title-case fallback
//! - **datetime**: fixed-priority date parsing to ISO 8601
//! - **amount**: `"<amount> <CUR>"` with two decimals

pub mod amount;
pub mod city;
pub mod datetime;
pub mod email;
pub mod name;
pub mod phone;
pub mod text;

pub use amount::{ParsedAmount, detect_currency, normalize_amount, parse_amount, parse_minor_units};
pub use city::{CANONICAL_CITIES, CITY_LOOKUP, CITY_VARIANTS, city_key, lookup_city, normalize_city};
pub use datetime::{DATE_FORMATS, DateFormat, normalize_date, parse_date};
pub use email::{is_plausible_email, normalize_email};
pub use name::{capitalize_token, normalize_name};
pub use phone::{national_digits, normalize_phone};
pub use text::{has_mojibake_markers, repair_text, repair_text_once, tidy_whitespace};
