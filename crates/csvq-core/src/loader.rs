//! Delimited text loading and writing.
//!
//! Parsing is delegated to the `csv` crate in flexible mode: records with a
//! different field count than the header are accepted and normalized by
//! [`Table::from_records`] (missing cells become empty, extra cells are
//! dropped). Quoting follows RFC 4180. A UTF-8 BOM in front of the first
//! header name is stripped.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::table::Table;

const UTF8_BOM: char = '\u{feff}';

/// Options controlling how delimited text is read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter (a single ASCII byte).
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl LoadOptions {
    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Loads a comma-separated file whose first line is the header.
pub fn load_table(path: &Path) -> Result<Table> {
    load_table_with_options(path, &LoadOptions::default())
}

/// Loads a delimited file using `options`.
pub fn load_table_with_options(path: &Path, options: &LoadOptions) -> Result<Table> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            QueryError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            QueryError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let table = load_table_from_reader(bytes.as_slice(), options)?;
    debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns().len(),
        "loaded table"
    );
    Ok(table)
}

/// Parses delimited text from any reader.
pub fn load_table_from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == 0 {
                name.trim_start_matches(UTF8_BOM).to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(Table::from_records(columns, records))
}

/// Writes `table` (header first) as delimited text.
pub fn write_table<W: Write>(table: &Table, writer: W, options: &LoadOptions) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);
    writer.write_record(table.columns())?;
    for row in table {
        writer.write_record(row.values())?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

impl Table {
    /// Serializes the table as comma-separated text.
    pub fn to_csv(&self) -> Result<String> {
        let mut buffer = Vec::new();
        write_table(self, &mut buffer, &LoadOptions::default())?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(text: &str) -> Table {
        load_table_from_reader(text.as_bytes(), &LoadOptions::default()).unwrap()
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let table = load_str("name,price\n  Widget , 007 \n");
        let row = &table.rows()[0];
        assert_eq!(row.get("name"), Some("  Widget "));
        assert_eq!(row.get("price"), Some(" 007 "));
    }

    #[test]
    fn test_quoted_fields() {
        let table = load_str("name,note\n\"Smith, J\",\"say \"\"hi\"\"\"\n");
        let row = &table.rows()[0];
        assert_eq!(row.get("name"), Some("Smith, J"));
        assert_eq!(row.get("note"), Some("say \"hi\""));
    }

    #[test]
    fn test_ragged_rows() {
        let table = load_str("a,b,c\n1\n1,2,3,4\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("c"), Some(""));
        assert_eq!(table.rows()[1].len(), 3);
    }

    #[test]
    fn test_bom_is_stripped() {
        let table = load_str("\u{feff}id,value\n1,2\n");
        assert_eq!(table.columns(), &["id".to_string(), "value".to_string()]);
        assert_eq!(table.rows()[0].get("id"), Some("1"));
    }

    #[test]
    fn test_missing_trailing_newline() {
        let table = load_str("id\n1\n2");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_header_only() {
        let table = load_str("id,value\n");
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn test_custom_delimiter() {
        let options = LoadOptions::default().with_delimiter(b';');
        let table = load_table_from_reader("a;b\n1,5;2\n".as_bytes(), &options).unwrap();
        assert_eq!(table.rows()[0].get("a"), Some("1,5"));
    }

    #[test]
    fn test_to_csv_quotes_when_needed() {
        let table = load_str("name,note\n\"Smith, J\",plain\n");
        assert_eq!(table.to_csv().unwrap(), "name,note\n\"Smith, J\",plain\n");
    }

    #[test]
    fn test_missing_file() {
        let err = load_table(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, QueryError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(dir.path()).unwrap_err();
        assert!(matches!(err, QueryError::FileRead { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_malformed_input() {
        let bytes: &[u8] = b"name,price\n\xff\xfe,1\n";
        let err = load_table_from_reader(bytes, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, QueryError::Csv(_)));
        assert!(err.to_string().starts_with("Malformed CSV input: "));
    }
}
