//! In-memory table of customer records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::Column;

/// One record: header name to raw string value.
///
/// Missing values are stored as the empty string. Key order is not the
/// display order; [`Dataset::headers`] carries that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, String>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `header`, if the column exists in this row.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.0.get(header).map(String::as_str)
    }

    /// Value for `header`, or the empty string when absent.
    pub fn value(&self, header: &str) -> &str {
        self.get(header).unwrap_or("")
    }

    pub fn set(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.0.insert(header.into(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every value is empty.
    pub fn is_blank(&self) -> bool {
        self.0.values().all(|v| v.trim().is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Ordered sequence of rows sharing one header list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Header names in source order.
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Each header paired with the role it resolves to, in header order.
    pub fn column_roles(&self) -> Vec<(&str, Option<Column>)> {
        self.headers
            .iter()
            .map(|header| (header.as_str(), Column::from_header(header)))
            .collect()
    }

    /// Header currently holding `column`, if any.
    pub fn header_for(&self, column: Column) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| Column::from_header(header) == Some(column))
            .map(String::as_str)
    }

    /// Values of `row` laid out in header order.
    pub fn ordered_values<'a>(&'a self, row: &'a Row) -> Vec<&'a str> {
        self.headers.iter().map(|header| row.value(header)).collect()
    }
}
