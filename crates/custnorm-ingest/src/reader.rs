//! Delimited text reading with encoding checks and header cleanup.

use std::collections::HashSet;
use std::path::Path;

use csv::ReaderBuilder;
use custnorm_model::{Dataset, Row};
use encoding_rs::WINDOWS_1252;
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};

/// Maximum input file size (100 MB default).
pub const MAX_INPUT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Cell values treated as missing.
pub const DEFAULT_NA_VALUES: [&str; 6] = ["None", "NaN", "nan", "NULL", "null", "N/A"];

/// Options for reading an input table.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Field delimiter. `None` uses a leading `sep=X` line if present, else `,`.
    pub delimiter: Option<u8>,
    /// Largest file accepted, in bytes.
    pub max_file_size: u64,
    /// Cell values replaced by the empty string.
    pub na_values: Vec<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_file_size: MAX_INPUT_FILE_SIZE,
            na_values: DEFAULT_NA_VALUES.iter().map(|v| (*v).to_string()).collect(),
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_size: u64) -> Self {
        self.max_file_size = max_size;
        self
    }
}

fn file_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Decode raw file bytes to text.
///
/// UTF-16 byte order marks are rejected. A UTF-8 BOM is dropped. Bytes that
/// are not valid UTF-8 are decoded as Windows-1252, the usual encoding of
/// legacy spreadsheet exports.
pub fn decode_input(bytes: &[u8], path: &Path) -> Result<String> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            warn!(
                path = %path.display(),
                "input is not valid UTF-8, decoding as Windows-1252"
            );
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            Ok(text.into_owned())
        }
    }
}

/// Split off a spreadsheet `sep=X` hint line.
fn take_separator_hint(text: &str) -> (Option<u8>, &str) {
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    let first = first.trim_end_matches('\r');
    match first.strip_prefix("sep=").map(str::as_bytes) {
        Some([delimiter]) => (Some(*delimiter), rest),
        _ => (None, text),
    }
}

/// Read a delimited text file into a dataset.
pub fn read_dataset(path: &Path, options: &IngestOptions) -> Result<Dataset> {
    check_file_size(path, options.max_file_size)?;
    let bytes = std::fs::read(path).map_err(|e| file_error(path, e))?;
    let text = decode_input(&bytes, path)?;
    let dataset = parse_dataset(&text, options, path)?;
    info!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.headers.len(),
        "input loaded"
    );
    Ok(dataset)
}

/// Parse already-decoded text. `source` is only used in error messages.
pub fn parse_dataset(text: &str, options: &IngestOptions, source: &Path) -> Result<Dataset> {
    let (hint, body) = take_separator_hint(text);
    let delimiter = options.delimiter.or(hint).unwrap_or(b',');
    debug!(delimiter = %char::from(delimiter), "reading delimited text");

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IngestError::CsvParse {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_string())
        .collect::<Vec<_>>();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: source.to_path_buf(),
        });
    }
    let mut seen = HashSet::new();
    for (position, header) in headers.iter().enumerate() {
        if header.is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: source.to_path_buf(),
                position,
            });
        }
        if !seen.insert(header.as_str()) {
            return Err(IngestError::DuplicateColumn {
                path: source.to_path_buf(),
                column: header.clone(),
            });
        }
    }

    let mut dataset = Dataset::new(headers.clone());
    let mut overlong = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;
        if record.len() > headers.len() {
            overlong += 1;
        }
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let raw = record.get(idx).unwrap_or("");
                let value = if options.na_values.iter().any(|na| na == raw.trim()) {
                    ""
                } else {
                    raw
                };
                (header.as_str(), value)
            })
            .collect();
        dataset.push(row);
    }
    if overlong > 0 {
        warn!(
            path = %source.display(),
            records = overlong,
            "records with more fields than headers; extra fields ignored"
        );
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Dataset> {
        parse_dataset(text, &IngestOptions::default(), Path::new("test.csv"))
    }

    #[test]
    fn test_separator_hint_is_honoured() {
        let dataset = parse("sep=;\nName;City\nAda;Lund\n").unwrap();
        assert_eq!(dataset.headers, vec!["Name", "City"]);
        assert_eq!(dataset.rows[0].value("City"), "Lund");
    }

    #[test]
    fn test_explicit_delimiter_overrides_hint() {
        let options = IngestOptions::default().with_delimiter(b'\t');
        let dataset =
            parse_dataset("Name\tCity\nAda\tLund\n", &options, Path::new("t")).unwrap();
        assert_eq!(dataset.rows[0].value("Name"), "Ada");
    }

    #[test]
    fn test_na_tokens_become_empty() {
        let dataset = parse("Name,Phone\nNaN,None\nAda, 070 \n").unwrap();
        assert_eq!(dataset.rows[0].value("Name"), "");
        assert_eq!(dataset.rows[0].value("Phone"), "");
        assert_eq!(dataset.rows[1].value("Phone"), " 070 ");
    }

    #[test]
    fn test_short_records_are_padded() {
        let dataset = parse("A,B,C\n1\n").unwrap();
        assert_eq!(dataset.rows[0].value("C"), "");
        assert_eq!(dataset.rows[0].len(), 3);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let dataset = parse(" Name , Email \nAda,a@b.se\n").unwrap();
        assert_eq!(dataset.headers, vec!["Name", "Email"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse(""), Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_duplicate_and_empty_headers() {
        assert!(matches!(
            parse("Name,Name\n1,2\n"),
            Err(IngestError::DuplicateColumn { column, .. }) if column == "Name"
        ));
        assert!(matches!(
            parse("Name,,City\n1,2,3\n"),
            Err(IngestError::EmptyColumnName { position: 1, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_utf16() {
        let result = decode_input(&[0xFF, 0xFE, b'A', 0], Path::new("x"));
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding { encoding: "UTF-16 LE", .. })
        ));
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        let text = decode_input(b"City\nG\xf6teborg\n", Path::new("x")).unwrap();
        assert_eq!(text, "City\nGöteborg\n");
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        let text = decode_input("\u{feff}Name\n".as_bytes(), Path::new("x")).unwrap();
        assert_eq!(text, "Name\n");
    }
}
