use anyhow::Result;

use custnorm_cli::pipeline::{default_output_path, run_clean};
use custnorm_cli::types::{CleanRequest, CleanResult};
use custnorm_ingest::IngestOptions;
use custnorm_model::NormalizationOptions;
use custnorm_output::OutputOptions;

use crate::cli::CleanArgs;
use crate::summary::print_cities;

pub fn run_cities() -> Result<()> {
    print_cities();
    Ok(())
}

pub fn run_clean_command(args: &CleanArgs) -> Result<CleanResult> {
    run_clean(&clean_request(args))
}

fn clean_request(args: &CleanArgs) -> CleanRequest {
    let mut ingest = IngestOptions::default();
    if let Some(delimiter) = args.delimiter {
        ingest = ingest.with_delimiter(delimiter);
    }
    let normalization = NormalizationOptions::default()
        .with_default_currency(args.currency.as_str())
        .with_country_code(args.country_code.as_str())
        .with_repair_passes(args.repair_passes);
    let output_options = OutputOptions::default()
        .with_delimiter(args.output_delimiter)
        .with_separator_hint(!args.no_sep_hint)
        .with_bom(!args.no_bom);
    CleanRequest {
        input: args.input.clone(),
        output: args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input)),
        ingest,
        normalization,
        output_options,
        dedupe: args.dedupe,
        dry_run: args.dry_run,
        report: args.report.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn clean_args(argv: &[&str]) -> CleanArgs {
        let cli = Cli::try_parse_from(argv).expect("parse");
        match cli.command {
            Command::Clean(args) => args,
            Command::Cities => panic!("expected clean command"),
        }
    }

    #[test]
    fn request_uses_defaults() {
        let args = clean_args(&["custnorm", "clean", "data/customers.csv"]);
        let request = clean_request(&args);
        assert_eq!(request.output, PathBuf::from("data/customers_cleaned.csv"));
        assert_eq!(request.ingest.delimiter, None);
        assert_eq!(request.normalization.default_currency, "SEK");
        assert_eq!(request.normalization.repair_passes, 2);
        assert_eq!(request.output_options, OutputOptions::default());
        assert!(request.report.is_none());
    }

    #[test]
    fn request_applies_flags() {
        let args = clean_args(&[
            "custnorm",
            "clean",
            "in.csv",
            "--output",
            "out.csv",
            "--delimiter",
            ";",
            "--output-delimiter",
            ",",
            "--currency",
            "eur",
            "--country-code",
            "+47",
            "--repair-passes",
            "1",
            "--no-sep-hint",
            "--no-bom",
            "--dedupe",
            "--dry-run",
        ]);
        let request = clean_request(&args);
        assert_eq!(request.output, PathBuf::from("out.csv"));
        assert_eq!(request.ingest.delimiter, Some(b';'));
        assert_eq!(request.normalization.default_currency, "EUR");
        assert_eq!(request.normalization.country_code, "47");
        assert_eq!(request.normalization.repair_passes, 1);
        assert_eq!(request.output_options.delimiter, b',');
        assert!(!request.output_options.separator_hint);
        assert!(!request.output_options.bom);
        assert!(request.dedupe);
        assert!(request.dry_run);
    }
}
