//! CLI argument definitions for the customer record normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "custnorm",
    version,
    about = "Customer record normalizer - Clean messy customer exports",
    long_about = "Normalize names, emails, phone numbers, cities, dates and amounts in a\n\
                  customer CSV export.\n\n\
                  Values that cannot be normalized are kept with a documented fallback\n\
                  and reported; rows are never dropped."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a customer CSV file.
    Clean(CleanArgs),

    /// List the known city names and their accepted variants.
    Cities,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Path to the customer CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Cleaned output file (default: <INPUT stem>_cleaned.csv next to the input).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Input field delimiter (default: `sep=` hint in the file, else comma).
    #[arg(long = "delimiter", value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Output field delimiter.
    #[arg(
        long = "output-delimiter",
        value_name = "CHAR",
        default_value = ";",
        value_parser = parse_delimiter
    )]
    pub output_delimiter: u8,

    /// Currency assumed when an amount names none.
    #[arg(long = "currency", value_name = "CODE", default_value = "SEK")]
    pub currency: String,

    /// Country calling code used for phone numbers.
    #[arg(long = "country-code", value_name = "DIGITS", default_value = "46")]
    pub country_code: String,

    /// Mojibake repair passes per value (0 disables repair).
    #[arg(long = "repair-passes", value_name = "N", default_value_t = 2)]
    pub repair_passes: usize,

    /// Remove exact duplicate rows after normalization.
    #[arg(long = "dedupe")]
    pub dedupe: bool,

    /// Do not write a `sep=` first line to the output.
    #[arg(long = "no-sep-hint")]
    pub no_sep_hint: bool,

    /// Do not prefix the output with a UTF-8 byte order mark.
    #[arg(long = "no-bom")]
    pub no_bom: bool,

    /// Normalize and report without writing the cleaned file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write field issues as JSON to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Allow customer values in trace logs.
    ///
    /// Values are redacted by default because records carry personal data.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Accepts a single ASCII character, or `tab` / `\t`.
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut bytes = value.bytes();
            match (bytes.next(), bytes.next()) {
                (Some(byte), None) if byte.is_ascii() && byte != b'"' => Ok(byte),
                _ => Err(format!(
                    "delimiter must be a single ASCII character, got {value:?}"
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn delimiter_parsing() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("\"").is_err());
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn clean_defaults() {
        let cli = Cli::try_parse_from(["custnorm", "clean", "customers.csv"]).expect("parse");
        let Command::Clean(args) = cli.command else {
            panic!("expected clean command");
        };
        assert_eq!(args.input, PathBuf::from("customers.csv"));
        assert_eq!(args.output_delimiter, b';');
        assert_eq!(args.currency, "SEK");
        assert_eq!(args.repair_passes, 2);
        assert!(args.delimiter.is_none());
        assert!(!args.dedupe && !args.dry_run && !args.log_data);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "custnorm",
            "clean",
            "customers.csv",
            "--log-format",
            "json",
            "--delimiter",
            "tab",
        ])
        .expect("parse");
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        let Command::Clean(args) = cli.command else {
            panic!("expected clean command");
        };
        assert_eq!(args.delimiter, Some(b'\t'));
    }
}
