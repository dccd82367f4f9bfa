//! CSV parsing helpers.
//!
//! Every CSV the service reads (uploads, ground truth) goes through
//! [`parse_csv_table`], so all inputs share one set of parsing rules: a
//! header row is required, rows must have as many cells as the header, blank
//! lines are skipped and content must be UTF-8.

use leaderboard_domain::{CsvTable, ParseError};
use tracing::debug;

/// Parse CSV bytes into a table.
///
/// # Examples
///
/// ```
/// use leaderboard_common::serialization::parse_csv_table;
///
/// let table = parse_csv_table(b"id,prediction\n1,0\n2,1\n").unwrap();
/// assert_eq!(table.column("prediction"), Some(vec!["0", "1"]));
/// ```
pub fn parse_csv_table(data: &[u8]) -> Result<CsvTable, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ParseError::Csv(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ParseError::Csv("no columns to parse from file".to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ParseError::Csv(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(columns = headers.len(), rows = rows.len(), "parsed CSV table");

    Ok(CsvTable::new(headers, rows))
}

/// Parse a numeric cell the way spreadsheet exports write numbers.
///
/// Surrounding whitespace is ignored; `row` is 1-based and used only for the
/// error message.
pub fn parse_number(column: &str, row: usize, value: &str) -> Result<f64, ParseError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            column: column.to_string(),
            row,
            value: value.to_string(),
        })
}
