//! Hidden reference labels.

use crate::errors::{SchemaError, TableKind};
use crate::table::{require_column, CsvTable, LabeledTable};

/// Default name of the ground-truth label column
pub const DEFAULT_TARGET_COLUMN: &str = "target";

/// The reference table submissions are scored against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruth {
    table: CsvTable,
    target_index: usize,
}

impl GroundTruth {
    /// Wrap a parsed table, requiring the target column.
    pub fn from_table(table: CsvTable, target_column: &str) -> Result<Self, SchemaError> {
        let target_index = require_column(&table, TableKind::GroundTruth, target_column)?;
        Ok(Self { table, target_index })
    }

    /// Name of the target column as it appears in the file
    pub fn target_column(&self) -> &str {
        &self.table.headers()[self.target_index]
    }
}

impl LabeledTable for GroundTruth {
    fn kind(&self) -> TableKind {
        TableKind::GroundTruth
    }

    fn table(&self) -> &CsvTable {
        &self.table
    }

    fn label_index(&self) -> usize {
        self.target_index
    }
}
