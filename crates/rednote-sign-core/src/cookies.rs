//! Session cookies.
//!
//! Order is preserved: the fingerprint embeds the joined cookie string, so
//! the jar must reproduce the browser's ordering.

use serde::Deserialize;

use crate::error::{Result, SignError};

/// Seconds a session stays usable past its earliest cookie expiry.
pub const EXPIRY_GRACE_SECS: f64 = 86_400.0;

/// One exported cookie.
#[derive(Debug, Clone, PartialEq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// Unix seconds, when known.
    pub expires_at: Option<f64>,
}

/// An ordered cookie jar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cookies {
    entries: Vec<Cookie>,
}

#[derive(Deserialize)]
struct ExportFile {
    cookies: Vec<ExportEntry>,
}

#[derive(Deserialize)]
struct ExportEntry {
    name: String,
    value: String,
    #[serde(rename = "expirationDate", default)]
    expiration_date: Option<f64>,
}

impl Cookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cookie:` header value (`a=b; c=d`).
    pub fn parse_header(header: &str) -> Result<Self> {
        let mut jar = Self::new();
        for segment in header.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (name, value) = segment
                .split_once('=')
                .ok_or_else(|| SignError::InvalidCookie(format!("no '=' in {segment:?}")))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(SignError::InvalidCookie(format!("empty name in {segment:?}")));
            }
            jar.insert(name, value.trim());
        }
        Ok(jar)
    }

    /// Parse a browser-extension export: `{"cookies":[{"name","value","expirationDate"}]}`.
    pub fn from_export_json(text: &str) -> Result<Self> {
        let file: ExportFile =
            serde_json::from_str(text).map_err(|e| SignError::InvalidCookie(e.to_string()))?;
        let entries = file
            .cookies
            .into_iter()
            .map(|entry| Cookie {
                name: entry.name,
                value: entry.value,
                expires_at: entry.expiration_date,
            })
            .collect();
        Ok(Self { entries })
    }

    /// Set a cookie, replacing an existing value in place.
    pub fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.value = value.to_string(),
            None => self.entries.push(Cookie {
                name: name.to_string(),
                value: value.to_string(),
                expires_at: None,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    /// Get a cookie that the protocol cannot do without.
    pub fn require(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => {
                tracing::warn!(cookie = name, "required cookie missing");
                Err(SignError::MissingCredential(name.to_string()))
            }
        }
    }

    /// `name=value` pairs joined with `"; "`.
    pub fn to_header(&self) -> String {
        self.entries
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Earliest expiry among cookies that carry one.
    pub fn earliest_expiry(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|c| c.expires_at)
            .fold(None, |min, t| Some(min.map_or(t, |m: f64| m.min(t))))
    }

    /// Whether the session is stale at `now_secs`: more than
    /// [`EXPIRY_GRACE_SECS`] past the earliest cookie expiry.
    pub fn is_expired(&self, now_secs: f64) -> bool {
        self.earliest_expiry()
            .is_some_and(|t| now_secs > t + EXPIRY_GRACE_SECS)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.entries.iter()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Cookies {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut jar = Self::new();
        for (name, value) in iter {
            jar.insert(name.as_ref(), value.as_ref());
        }
        jar
    }
}
