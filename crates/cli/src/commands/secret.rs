//! Ground-truth secret commands
//!
//! `encode` turns a ground-truth CSV into the value stored under
//! `[secrets]`; `decode` reverses it to check what is deployed.

use anyhow::{Context, Result};
use leaderboard_common::{decode_secret, encode_secret, secrets_toml_entry};
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::{read_input, CommandContext};
use crate::output::{Report, TableFormatter};

/// An encoded secret ready to paste into `config/secrets.toml`
#[derive(Debug, Serialize)]
pub struct EncodedSecret {
    pub key: String,
    pub value: String,
    pub toml: String,
    pub source_bytes: usize,
}

impl EncodedSecret {
    pub fn new(key: &str, data: &[u8]) -> Self {
        let value = encode_secret(data);
        Self {
            key: key.to_string(),
            toml: secrets_toml_entry(key, &value),
            value,
            source_bytes: data.len(),
        }
    }
}

impl Report for EncodedSecret {
    fn to_table(&self) -> String {
        format!(
            "{}\n\nAdd this line to the [secrets] table of config/secrets.toml:\n\n{}",
            TableFormatter::key_value(&[
                ("Key", self.key.clone()),
                ("Source size", format!("{} bytes", self.source_bytes)),
                ("Encoded size", format!("{} chars", self.value.len())),
            ]),
            self.toml
        )
    }
}

/// A decoded secret
#[derive(Debug, Serialize)]
pub struct DecodedSecret {
    pub content: String,
}

impl Report for DecodedSecret {
    fn to_table(&self) -> String {
        self.content.clone()
    }
}

/// Encode a ground-truth file
pub fn encode(ctx: &CommandContext, file: PathBuf, key: Option<String>) -> Result<()> {
    let data = read_input(&file)?;
    let key = key.unwrap_or_else(|| ctx.config.ground_truth.secret_key.clone());
    tracing::debug!(file = %file.display(), key = %key, bytes = data.len(), "encoding secret");

    ctx.print(&EncodedSecret::new(&key, &data))
}

/// Decode a secret value given inline or read from a file
pub fn decode(ctx: &CommandContext, value: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let encoded = match (value, file) {
        (Some(value), _) => value,
        (None, Some(file)) => String::from_utf8(read_input(&file)?)
            .with_context(|| format!("{} is not UTF-8 text", file.display()))?,
        (None, None) => anyhow::bail!("Provide a secret value or --file"),
    };

    let content = decode_secret(&encoded).context("Failed to decode secret")?;
    ctx.print(&DecodedSecret { content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use leaderboard_testing::BINARY_TRUTH_CSV;

    #[test]
    fn test_encoded_secret() {
        let secret = EncodedSecret::new("ground_truth_data", b"target\n1\n");
        assert_eq!(secret.value, "dGFyZ2V0CjEK");
        assert_eq!(secret.toml, "ground_truth_data = \"dGFyZ2V0CjEK\"");
        assert_eq!(secret.source_bytes, 9);

        let table = secret.render(OutputFormat::Table).unwrap();
        assert!(table.ends_with("ground_truth_data = \"dGFyZ2V0CjEK\""));
    }

    #[test]
    fn test_encode_then_decode_reproduces_file() {
        let secret = EncodedSecret::new("ground_truth_data", BINARY_TRUTH_CSV);
        let decoded = decode_secret(&secret.value).unwrap();
        assert_eq!(decoded.as_bytes(), BINARY_TRUTH_CSV);
    }
}
