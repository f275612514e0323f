//! File output tests.

use custnorm_ingest::{IngestOptions, read_dataset};
use custnorm_model::{Dataset, Row};
use custnorm_output::{OutputOptions, write_dataset, write_dataset_to};
use tempfile::tempdir;

fn cleaned() -> Dataset {
    let rows: Vec<Row> = vec![
        [
            ("name", "Oscar Nilsson"),
            ("city", "Göteborg"),
            ("amount_currency", "5204.00 SEK"),
        ]
        .into_iter()
        .collect(),
        [
            ("name", "Anna \"Annie\" Berg"),
            ("city", "Malmö"),
            ("amount_currency", ""),
        ]
        .into_iter()
        .collect(),
    ];
    Dataset::with_rows(
        vec!["name".into(), "city".into(), "amount_currency".into()],
        rows,
    )
}

#[test]
fn written_file_reads_back_identically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cleaned.csv");
    let dataset = cleaned();
    write_dataset(&path, &dataset, &OutputOptions::default()).unwrap();

    let read_back = read_dataset(&path, &IngestOptions::default()).unwrap();
    assert_eq!(read_back, dataset);
}

#[test]
fn unwritable_path_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("cleaned.csv");
    assert!(write_dataset(&path, &cleaned(), &OutputOptions::default()).is_err());
}

#[test]
fn semicolon_export() {
    let mut buffer = Vec::new();
    let options = OutputOptions::default().with_bom(false);
    write_dataset_to(&mut buffer, &cleaned(), &options).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    insta::assert_snapshot!(text);
}
