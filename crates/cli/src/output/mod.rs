//! Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

mod formatters;
mod table;

pub use formatters::{JsonFormatter, PlainFormatter};
pub use table::TableFormatter;

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty JSON, for scripts
    Json,
    /// Bordered tables (default)
    #[default]
    Table,
    /// Tab-separated rows without decoration
    Plain,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// A command result that can be printed in every output format
pub trait Report: Serialize {
    /// Human-readable rendering
    fn to_table(&self) -> String;

    /// Format using the specified format
    fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => JsonFormatter::format(self),
            OutputFormat::Table => Ok(self.to_table()),
            OutputFormat::Plain => PlainFormatter::format(self),
        }
    }
}

/// Color helpers
pub mod colors {
    use colored::*;

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    pub fn bold(s: &str) -> ColoredString {
        s.bold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Greeting {
        team: String,
    }

    impl Report for Greeting {
        fn to_table(&self) -> String {
            format!("hello {}", self.team)
        }
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Plain.to_string(), "plain");
    }

    #[test]
    fn test_output_format_from_cli_value() {
        assert_eq!(OutputFormat::from_str("json", true).unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("PLAIN", true).unwrap(), OutputFormat::Plain);
        assert!(OutputFormat::from_str("yaml", true).is_err());
    }

    #[test]
    fn test_report_render() {
        let greeting = Greeting {
            team: "Alpha".to_string(),
        };
        assert_eq!(greeting.render(OutputFormat::Table).unwrap(), "hello Alpha");
        assert_eq!(greeting.render(OutputFormat::Plain).unwrap(), "team: Alpha");
        assert!(greeting
            .render(OutputFormat::Json)
            .unwrap()
            .contains("\"team\": \"Alpha\""));
    }
}
