//! Data model for the customer record normalizer.
//!
//! - **column**: recognized column roles and header resolution
//! - **dataset**: `Row` and `Dataset`, the in-memory table
//! - **issue**: per-field outcomes, failures and the run report
//! - **options**: normalization configuration
//! - **redact**: row-level value redaction for logs

pub mod column;
pub mod dataset;
pub mod error;
pub mod issue;
pub mod options;
pub mod redact;

pub use column::Column;
pub use dataset::{Dataset, Row};
pub use error::{ModelError, Result};
pub use issue::{FieldFailure, FieldIssue, FieldOutcome, IssueSeverity, NormalizationReport};
pub use options::{KNOWN_CURRENCIES, NormalizationOptions};
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data_enabled};
