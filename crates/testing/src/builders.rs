//! Builders for test uploads.

/// Builds CSV bytes row by row.
///
/// Cells are written as given; quote them yourself if they contain commas.
#[derive(Debug, Clone, Default)]
pub struct CsvBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvBuilder {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Add one single-cell row per value
    pub fn column_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.rows.push(vec![value.into()]);
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = self.headers.join(",");
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out.into_bytes()
    }
}

/// Single-column ground truth named `target`
pub fn truth_csv<S: AsRef<str>>(labels: &[S]) -> Vec<u8> {
    CsvBuilder::new(["target"])
        .column_values(labels.iter().map(|l| l.as_ref().to_string()))
        .build()
}

/// Single-column submission named `prediction`
pub fn prediction_csv<S: AsRef<str>>(labels: &[S]) -> Vec<u8> {
    CsvBuilder::new(["prediction"])
        .column_values(labels.iter().map(|l| l.as_ref().to_string()))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_column_helpers() {
        assert_eq!(truth_csv(&["1", "0"]), b"target\n1\n0\n".to_vec());
        assert_eq!(prediction_csv::<&str>(&[]), b"prediction\n".to_vec());
    }
}
