//! Output formatters

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a value as pretty JSON
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Plain text formatter
///
/// Objects print as `key: value` lines. Lists print one item per line, and
/// list items that are objects print their values tab-separated so the
/// output can be piped into `cut` or `awk`.
pub struct PlainFormatter;

impl PlainFormatter {
    /// Format a value as plain text
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        let json = serde_json::to_value(value)?;
        Ok(Self::format_value(&json))
    }

    fn format_value(value: &Value) -> String {
        match value {
            Value::Object(obj) => obj
                .iter()
                .map(|(k, v)| match v {
                    Value::Array(items) if !items.is_empty() => {
                        format!("{}:\n{}", k, Self::format_rows(items))
                    }
                    _ => format!("{}: {}", k, Self::scalar(v)),
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Value::Array(items) => Self::format_rows(items),
            other => Self::scalar(other),
        }
    }

    fn format_rows(items: &[Value]) -> String {
        items
            .iter()
            .map(|item| match item {
                Value::Object(obj) => obj.values().map(Self::scalar).collect::<Vec<_>>().join("\t"),
                other => Self::scalar(other),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Array(items) => format!("[{} items]", items.len()),
            other => other.to_string(),
        }
    }
}
