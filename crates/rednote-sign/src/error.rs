//! Error types for the signer.

use rednote_sign_core::SignError;
use thiserror::Error;

/// Errors that can occur while configuring a signer or signing a request.
#[derive(Debug, Error)]
pub enum SignerError {
    /// A signing primitive failed.
    #[error("signing error: {0}")]
    Sign(#[from] SignError),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SignerError {
    /// True when the request failed for lack of a session credential.
    ///
    /// The caller must re-authenticate; retrying with the same cookies
    /// cannot succeed.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, SignerError::Sign(SignError::MissingCredential(_)))
    }
}

/// Result type for signer operations.
pub type Result<T> = std::result::Result<T, SignerError>;
