//! Signer configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignerError};

/// Desktop Chrome user agent sent with every request by default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Values embedded in the signature envelopes and the fingerprint.
///
/// Every field has a default, so a partial JSON file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// App id written into `x-s-common` (`x3`).
    pub app_id: String,
    /// Data SDK version: `x-s` `x0` and `x-s-common` `x1`.
    pub sdk_version: String,
    /// Platform name: `x-s` `x2` and `x-s-common` `x2`.
    pub platform: String,
    /// Web bundle build: `x-s-common` `x4`.
    pub web_build: String,
    /// User agent fed to the fingerprint.
    pub user_agent: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            app_id: "xhs-pc-web".to_string(),
            sdk_version: "4.2.6".to_string(),
            platform: "Windows".to_string(),
            web_build: "4.86.0".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SignerConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SignerError::Config(e.to_string()))
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
