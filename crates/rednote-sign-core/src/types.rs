//! Request types shared by every signing component.

use serde_json::{Map, Value};
use std::fmt;
use url::Url;

use crate::cookies::Cookies;
use crate::error::{Result, SignError};

/// Cookie carrying the device id.
pub const DEVICE_ID_COOKIE: &str = "a1";

/// Cookie carrying the app/platform id.
pub const APP_ID_COOKIE: &str = "xsecappid";

/// Ordered request payload. Key order is part of the signed content.
pub type Payload = Map<String, Value>;

/// HTTP method, as far as the content string cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Parse a method name case-insensitively.
    ///
    /// Everything that is not `POST` signs like a query-string request.
    pub fn parse(method: &str) -> Self {
        if method.eq_ignore_ascii_case("POST") {
            Self::Post
        } else {
            Self::Get
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to sign one outgoing request.
///
/// `a1` and `app_id` are always present and non-empty; construction fails
/// with [`SignError::MissingCredential`] otherwise.
#[derive(Clone, PartialEq)]
pub struct SigningContext {
    pub method: HttpMethod,
    /// Request path without query string.
    pub uri: String,
    pub payload: Payload,
    /// Device id from the `a1` cookie.
    pub a1: String,
    /// App id from the `xsecappid` cookie.
    pub app_id: String,
    /// Unix milliseconds; also sent as `x-t`.
    pub timestamp_millis: u64,
}

impl SigningContext {
    /// Create a context from explicit credentials.
    ///
    /// `uri` may be a bare path or a full URL; only the path is kept.
    pub fn new(
        method: HttpMethod,
        uri: &str,
        payload: Payload,
        a1: &str,
        app_id: &str,
        timestamp_millis: u64,
    ) -> Result<Self> {
        if a1.is_empty() {
            return Err(SignError::MissingCredential(DEVICE_ID_COOKIE.into()));
        }
        if app_id.is_empty() {
            return Err(SignError::MissingCredential(APP_ID_COOKIE.into()));
        }

        Ok(Self {
            method,
            uri: request_path(uri)?,
            payload,
            a1: a1.to_string(),
            app_id: app_id.to_string(),
            timestamp_millis,
        })
    }

    /// Create a context, reading `a1` and `xsecappid` from session cookies.
    pub fn from_cookies(
        method: HttpMethod,
        uri: &str,
        payload: Payload,
        cookies: &Cookies,
        timestamp_millis: u64,
    ) -> Result<Self> {
        let a1 = cookies.require(DEVICE_ID_COOKIE)?;
        let app_id = cookies.require(APP_ID_COOKIE)?;
        Self::new(method, uri, payload, a1, app_id, timestamp_millis)
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // a1 is a session token; keep it out of logs
        f.debug_struct("SigningContext")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("payload_keys", &self.payload.len())
            .field("app_id", &self.app_id)
            .field("timestamp_millis", &self.timestamp_millis)
            .finish_non_exhaustive()
    }
}

/// Reduce a path or full URL to its path, dropping any query or fragment.
///
/// Inputs with a scheme go through [`Url::parse`]; bare paths are cut at the
/// first `?` or `#`.
pub fn request_path(uri: &str) -> Result<String> {
    if uri.contains("://") {
        let url = Url::parse(uri).map_err(|e| SignError::Encoding(format!("{uri}: {e}")))?;
        return Ok(url.path().to_string());
    }

    let end = uri.find(['?', '#']).unwrap_or(uri.len());
    Ok(uri[..end].to_string())
}
