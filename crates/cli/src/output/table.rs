//! Table formatting utilities

use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, CellAlignment, ContentArrangement, Table,
};

/// Table formatter
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new table with default styling
    pub fn new() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// Create a table with headers and rows, right-aligning the given
    /// numeric columns
    pub fn simple(headers: &[&str], rows: Vec<Vec<String>>, numeric_columns: &[usize]) -> String {
        let mut table = Self::new();
        table.set_header(headers.to_vec());

        for row in rows {
            table.add_row(row);
        }

        for index in numeric_columns {
            if let Some(column) = table.column_mut(*index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }

        table.to_string()
    }

    /// Create a key-value table
    pub fn key_value(items: &[(&str, String)]) -> String {
        let mut table = Self::new();

        for (key, value) in items {
            table.add_row(vec![key.to_string(), value.clone()]);
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_table() {
        let rows = vec![
            vec!["1".to_string(), "Alpha".to_string(), "0.8000".to_string()],
            vec!["2".to_string(), "Beta".to_string(), "0.5000".to_string()],
        ];
        let result = TableFormatter::simple(&["Rank", "Team", "F1 Score"], rows, &[0, 2]);
        assert!(result.contains("Alpha"));
        assert!(result.contains("F1 Score"));
    }

    #[test]
    fn test_key_value_table() {
        let result = TableFormatter::key_value(&[("Metric", "rmse".to_string())]);
        assert!(result.contains("Metric"));
        assert!(result.contains("rmse"));
    }
}
