//! CLI library components for the customer record normalizer.

pub mod dedupe;
pub mod logging;
pub mod pipeline;
pub mod types;
