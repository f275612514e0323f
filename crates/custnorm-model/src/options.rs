//! Configuration options for field normalization.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Currency codes the amount normalizer recognizes.
pub const KNOWN_CURRENCIES: [&str; 6] = ["SEK", "USD", "EUR", "NOK", "DKK", "GBP"];

/// Options for normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    /// Currency used when an amount carries no recognizable code.
    pub default_currency: String,

    /// Country calling code, digits only (e.g. "46").
    pub country_code: String,

    /// Earliest year a parsed date may have.
    ///
    /// Also rejects short years read through a four-digit pattern, so
    /// "12/11/10" is not taken as the year 12.
    pub min_year: i32,

    /// Latest year a parsed date may have.
    pub max_year: i32,

    /// Maximum number of mojibake repair passes per value.
    pub repair_passes: usize,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            default_currency: "SEK".to_string(),
            country_code: "46".to_string(),
            min_year: 1900,
            max_year: 2100,
            repair_passes: 2,
        }
    }
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_currency(mut self, code: impl Into<String>) -> Self {
        self.default_currency = code.into().trim().to_uppercase();
        self
    }

    #[must_use]
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = code.into().trim().trim_start_matches('+').to_string();
        self
    }

    #[must_use]
    pub fn with_year_window(mut self, min_year: i32, max_year: i32) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    #[must_use]
    pub fn with_repair_passes(mut self, passes: usize) -> Self {
        self.repair_passes = passes;
        self
    }

    /// Check that the options describe a usable configuration.
    pub fn validate(&self) -> Result<()> {
        if !KNOWN_CURRENCIES.contains(&self.default_currency.as_str()) {
            return Err(ModelError::UnknownCurrency {
                code: self.default_currency.clone(),
            });
        }
        if self.country_code.is_empty() || !self.country_code.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ModelError::InvalidCountryCode {
                code: self.country_code.clone(),
            });
        }
        if self.min_year > self.max_year {
            return Err(ModelError::InvalidYearWindow {
                min: self.min_year,
                max: self.max_year,
            });
        }
        Ok(())
    }
}
