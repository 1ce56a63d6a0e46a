//! In-memory row and table types.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One record of the input: column name to cell text, in header order.
///
/// Rows from the same table share their column list, so every row carries
/// exactly the header's key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<String>,
}

impl Row {
    fn new(columns: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.resize(columns.len(), String::new());
        Self { columns, values }
    }

    /// Returns the cell for `column`, or `None` when the column is unknown.
    ///
    /// With duplicated header names the right-most column wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        let idx = self.columns.iter().rposition(|c| c == column)?;
        self.values.get(idx).map(String::as_str)
    }

    /// Returns true if `column` is one of this row's keys.
    pub fn contains_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Iterates over `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// An ordered sequence of rows sharing one header.
///
/// Tables are never mutated in place; filtering builds a new table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Arc<[String]>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns: columns.into(),
            rows: Vec::new(),
        }
    }

    /// Builds a table from a header and raw records.
    ///
    /// Records shorter than the header are padded with empty cells, longer
    /// records lose their extra fields.
    pub fn from_records<I, R, S>(columns: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Arc<[String]> = columns.into();
        let width = columns.len();
        let rows = records
            .into_iter()
            .map(|record| {
                let values = record.into_iter().take(width).map(Into::into).collect();
                Row::new(Arc::clone(&columns), values)
            })
            .collect();
        Self { columns, rows }
    }

    /// Returns a table with the same header holding `rows`.
    pub(crate) fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            columns: Arc::clone(&self.columns),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.rows)
    }
}
