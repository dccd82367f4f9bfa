//! Parsed CSV tables and the labelled views built on top of them.

use crate::errors::{SchemaError, TableKind};

/// A header row plus string cells.
///
/// Every row has exactly `headers.len()` cells; the CSV parser rejects ragged
/// input before a table is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Build a table, normalising header names.
    ///
    /// Header names are trimmed and a leading UTF-8 byte-order mark is
    /// dropped from the first one, so spreadsheet exports match `target`.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h.as_str() };
                h.trim().to_string()
            })
            .collect();
        Self { headers, rows }
    }

    /// Header names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in file order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact (trimmed) header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name.trim())
    }

    /// Cells of one column, top to bottom
    pub fn column_at(&self, index: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
            .collect()
    }

    /// Cells of a named column
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        self.column_index(name).map(|i| self.column_at(i))
    }
}

/// A table with one designated label column.
///
/// Ground truth and submissions are both this shape; they differ only in
/// which column carries the values being compared.
pub trait LabeledTable {
    /// Which file this is, for error messages
    fn kind(&self) -> TableKind;

    /// The underlying table
    fn table(&self) -> &CsvTable;

    /// Position of the label column
    fn label_index(&self) -> usize;

    /// Label column values in row order
    fn labels(&self) -> Vec<&str> {
        self.table().column_at(self.label_index())
    }

    /// Number of rows
    fn len(&self) -> usize {
        self.table().len()
    }

    /// Whether the table has no data rows
    fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// Values of an identifier column, for keyed alignment
    fn keys(&self, id_column: &str) -> Result<Vec<&str>, SchemaError> {
        self.table()
            .column(id_column)
            .ok_or_else(|| SchemaError::MissingColumn {
                table: self.kind(),
                column: id_column.to_string(),
            })
    }
}

/// Locate a required column, failing with a schema error naming the file.
pub(crate) fn require_column(
    table: &CsvTable,
    kind: TableKind,
    column: &str,
) -> Result<usize, SchemaError> {
    if table.headers().is_empty() {
        return Err(SchemaError::EmptyHeader(kind));
    }
    table
        .column_index(column)
        .ok_or_else(|| SchemaError::MissingColumn {
            table: kind,
            column: column.to_string(),
        })
}
