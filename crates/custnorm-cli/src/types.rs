use std::path::PathBuf;

use custnorm_ingest::IngestOptions;
use custnorm_model::{Dataset, NormalizationOptions, NormalizationReport};
use custnorm_output::OutputOptions;

/// Everything one `clean` run needs, resolved from command-line flags.
#[derive(Debug, Clone)]
pub struct CleanRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub ingest: IngestOptions,
    pub normalization: NormalizationOptions,
    pub output_options: OutputOptions,
    pub dedupe: bool,
    /// Normalize and report without writing the cleaned file.
    pub dry_run: bool,
    /// Optional JSON issue report path.
    pub report: Option<PathBuf>,
}

#[derive(Debug)]
pub struct CleanResult {
    pub input: PathBuf,
    /// Cleaned file, `None` on a dry run.
    pub output: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub rows_in: usize,
    pub duplicates_removed: usize,
    pub dataset: Dataset,
    pub report: NormalizationReport,
}

impl CleanResult {
    pub fn rows_out(&self) -> usize {
        self.dataset.len()
    }
}
