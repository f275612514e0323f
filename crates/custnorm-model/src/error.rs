use thiserror::Error;

/// Errors raised when building or validating model configuration.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Currency code outside the supported set.
    #[error("unsupported currency code '{code}'")]
    UnknownCurrency { code: String },

    /// Country calling code must be a non-empty digit string.
    #[error("invalid country code '{code}': expected digits only")]
    InvalidCountryCode { code: String },

    /// Date plausibility window where the lower bound exceeds the upper.
    #[error("invalid year window {min}..={max}")]
    InvalidYearWindow { min: i32, max: i32 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
