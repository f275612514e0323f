//! Customer record transformation.
//!
//! - **normalization**: the per-column cleaning rules (text repair, name,
//!   email, phone, city, date, amount)
//! - **pipeline**: applies the rules to every row of a dataset

pub mod normalization;
pub mod pipeline;

pub use normalization::{
    normalize_amount, normalize_city, normalize_date, normalize_email, normalize_name,
    normalize_phone, repair_text, tidy_whitespace,
};
pub use pipeline::{NormalizedDataset, Normalizer};
