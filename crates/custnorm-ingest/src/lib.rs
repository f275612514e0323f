//! Customer data ingestion.
//!
//! Reads one delimited text file into a [`Dataset`](custnorm_model::Dataset):
//!
//! - **Encoding**: UTF-8 with or without BOM; Windows-1252 fallback for
//!   legacy exports; UTF-16 is rejected
//! - **Delimiter**: configurable, or taken from a leading `sep=X` line
//! - **Headers**: trimmed; empty or duplicate names are errors
//! - **Missing values**: NA tokens such as `NaN` or `None` become empty
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use custnorm_ingest::{IngestOptions, read_dataset};
//!
//! let dataset = read_dataset(Path::new("messy_customer_data.csv"), &IngestOptions::default())?;
//! ```

mod error;
mod reader;

pub use error::{IngestError, Result};
pub use reader::{
    DEFAULT_NA_VALUES, IngestOptions, MAX_INPUT_FILE_SIZE, check_file_size, decode_input,
    parse_dataset, read_dataset,
};
