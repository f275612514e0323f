use std::collections::HashSet;

use custnorm_model::{Dataset, Row};

/// Remove exact duplicate rows, keeping the first occurrence.
///
/// Rows are compared after normalization so records that differed only in
/// formatting collapse into one. Blank rows are always kept. Returns the
/// number of rows removed.
pub fn dedupe_rows(dataset: &mut Dataset) -> usize {
    let before = dataset.rows.len();
    let mut seen: HashSet<Row> = HashSet::with_capacity(before);
    dataset
        .rows
        .retain(|row| row.is_blank() || seen.insert(row.clone()));
    before - dataset.rows.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, email: &str) -> Row {
        [("Name", name), ("Email", email)].into_iter().collect()
    }

    fn dataset(rows: Vec<Row>) -> Dataset {
        Dataset::with_rows(vec!["Name".to_string(), "Email".to_string()], rows)
    }

    #[test]
    fn removes_later_duplicates() {
        let mut data = dataset(vec![
            row("Oscar Nilsson", "oscar@example.se"),
            row("Anna Berg", "anna@example.se"),
            row("Oscar Nilsson", "oscar@example.se"),
        ]);
        assert_eq!(dedupe_rows(&mut data), 1);
        assert_eq!(data.len(), 2);
        assert_eq!(data.rows[0].value("Name"), "Oscar Nilsson");
        assert_eq!(data.rows[1].value("Name"), "Anna Berg");
    }

    #[test]
    fn rows_differing_in_one_field_stay() {
        let mut data = dataset(vec![
            row("Oscar Nilsson", "oscar@example.se"),
            row("Oscar Nilsson", "oscar.n@example.se"),
        ]);
        assert_eq!(dedupe_rows(&mut data), 0);
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn blank_rows_are_kept() {
        let mut data = dataset(vec![row("", ""), row("", "")]);
        assert_eq!(dedupe_rows(&mut data), 0);
        assert_eq!(data.len(), 2);
    }
}
