//! Embedded-secret encoding of the ground truth.
//!
//! The ground-truth CSV is stored in the secrets table as a single standard
//! base64 string, so it never has to be committed next to the code.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Secret key the ground truth is stored under by default
pub const DEFAULT_SECRET_KEY: &str = "ground_truth_data";

/// Errors decoding a secret value
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// Not valid base64
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not UTF-8 text
    #[error("decoded value is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encode raw file bytes for the secrets table.
pub fn encode_secret(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode a secret value back to its raw bytes.
///
/// Surrounding whitespace (e.g. a trailing newline from an environment file)
/// is ignored.
pub fn decode_secret_bytes(encoded: &str) -> Result<Vec<u8>, SecretError> {
    Ok(STANDARD.decode(encoded.trim())?)
}

/// Decode a secret value to UTF-8 text.
///
/// # Examples
///
/// ```
/// use leaderboard_common::secret::{decode_secret, encode_secret};
///
/// let encoded = encode_secret(b"target\n1\n0\n");
/// assert_eq!(decode_secret(&encoded).unwrap(), "target\n1\n0\n");
/// ```
pub fn decode_secret(encoded: &str) -> Result<String, SecretError> {
    Ok(String::from_utf8(decode_secret_bytes(encoded)?)?)
}

/// A `key = "value"` line ready to paste into `config/secrets.toml`.
pub fn secrets_toml_entry(key: &str, encoded: &str) -> String {
    format!("{} = \"{}\"", key, encoded)
}
