//! Contestant prediction files.

use crate::errors::{SchemaError, TableKind};
use crate::table::{require_column, CsvTable, LabeledTable};

/// Default name of the submission prediction column
pub const DEFAULT_PREDICTION_COLUMN: &str = "prediction";

/// A validated upload with a prediction column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    table: CsvTable,
    prediction_index: usize,
}

impl Submission {
    /// Wrap a parsed table, requiring the prediction column.
    pub fn from_table(table: CsvTable, prediction_column: &str) -> Result<Self, SchemaError> {
        let prediction_index = require_column(&table, TableKind::Submission, prediction_column)?;
        Ok(Self {
            table,
            prediction_index,
        })
    }
}

impl LabeledTable for Submission {
    fn kind(&self) -> TableKind {
        TableKind::Submission
    }

    fn table(&self) -> &CsvTable {
        &self.table
    }

    fn label_index(&self) -> usize {
        self.prediction_index
    }
}
