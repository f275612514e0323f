//! Delimited text output for cleaned datasets.
//!
//! The defaults target spreadsheet import: semicolon delimiter, a leading
//! `sep=;` line so the delimiter is picked up without an import dialog, a
//! UTF-8 byte order mark so accented names survive, and every field quoted
//! so values like `(+46) 701234567` are not reinterpreted as numbers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};
use custnorm_model::Dataset;
use thiserror::Error;
use tracing::info;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Errors raised while writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode record: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OutputError>;

/// Options controlling the written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub delimiter: u8,
    /// Write a `sep=<delimiter>` first line.
    pub separator_hint: bool,
    /// Prefix the file with a UTF-8 byte order mark.
    pub bom: bool,
    /// Quote every field instead of only those that need it.
    pub quote_all: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            separator_hint: true,
            bom: true,
            quote_all: true,
        }
    }
}

impl OutputOptions {
    /// Plain RFC 4180 style output: comma, no hint, no BOM, minimal quoting.
    pub fn plain() -> Self {
        Self {
            delimiter: b',',
            separator_hint: false,
            bom: false,
            quote_all: false,
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_separator_hint(mut self, enable: bool) -> Self {
        self.separator_hint = enable;
        self
    }

    #[must_use]
    pub fn with_bom(mut self, enable: bool) -> Self {
        self.bom = enable;
        self
    }
}

/// Write `dataset` to any writer, headers in dataset order.
pub fn write_dataset_to<W: Write>(
    mut writer: W,
    dataset: &Dataset,
    options: &OutputOptions,
) -> Result<()> {
    if options.bom {
        writer.write_all(UTF8_BOM)?;
    }
    if options.separator_hint {
        writeln!(writer, "sep={}", char::from(options.delimiter))?;
    }
    let mut csv_writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .quote_style(if options.quote_all {
            QuoteStyle::Always
        } else {
            QuoteStyle::Necessary
        })
        .from_writer(writer);
    csv_writer.write_record(&dataset.headers)?;
    for row in &dataset.rows {
        csv_writer.write_record(dataset.ordered_values(row))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `dataset` to `path`, replacing any existing file.
pub fn write_dataset(path: &Path, dataset: &Dataset, options: &OutputOptions) -> Result<()> {
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_dataset_to(BufWriter::new(file), dataset, options)?;
    info!(path = %path.display(), rows = dataset.len(), "output written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use custnorm_model::Row;

    fn sample() -> Dataset {
        let row: Row = [("name", "Åsa Öberg"), ("phone", "(+46) 701234567")]
            .into_iter()
            .collect();
        Dataset::with_rows(vec!["name".into(), "phone".into()], vec![row])
    }

    #[test]
    fn default_output_is_spreadsheet_friendly() {
        let mut buffer = Vec::new();
        write_dataset_to(&mut buffer, &sample(), &OutputOptions::default()).unwrap();
        assert!(buffer.starts_with(UTF8_BOM));
        let text = String::from_utf8(buffer[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            text,
            "sep=;\n\"name\";\"phone\"\n\"Åsa Öberg\";\"(+46) 701234567\"\n"
        );
    }

    #[test]
    fn plain_output_quotes_only_when_needed() {
        let mut buffer = Vec::new();
        write_dataset_to(&mut buffer, &sample(), &OutputOptions::plain()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "name,phone\nÅsa Öberg,(+46) 701234567\n");
    }
}
