//! Error types for rednote signing.

use thiserror::Error;

/// Errors that can occur while building signatures.
///
/// Every variant is fatal for the request being signed. The signer never
/// retries and never substitutes a default for a missing credential.
#[derive(Debug, Error)]
pub enum SignError {
    /// A session credential (`a1`, `xsecappid`) is absent.
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// The payload could not be serialized to canonical JSON.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Input to an alphabet decode contains foreign symbols or bad padding.
    #[error("alphabet decode error: {0}")]
    AlphabetDecode(String),

    /// A cookie header or cookie export could not be parsed.
    #[error("invalid cookie: {0}")]
    InvalidCookie(String),
}

impl From<serde_json::Error> for SignError {
    fn from(e: serde_json::Error) -> Self {
        SignError::Encoding(e.to_string())
    }
}

impl From<base64::DecodeError> for SignError {
    fn from(e: base64::DecodeError) -> Self {
        SignError::AlphabetDecode(e.to_string())
    }
}

/// Result type for signing operations.
pub type Result<T> = std::result::Result<T, SignError>;
