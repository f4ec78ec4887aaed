//! Content string: the exact text the server hashes for x-s.
//!
//! - POST: `uri` followed by the compact JSON body (insertion order, no
//!   whitespace, non-ASCII left unescaped).
//! - GET without payload: `uri` unchanged.
//! - GET with payload: `uri?k=v&k=v`, where sequence values are joined with
//!   literal commas and the only escape ever applied is `=` -> `%3D` inside
//!   values. This is the platform's own encoder, not a URL encoder.

use serde_json::Value;

use crate::error::Result;
use crate::types::{HttpMethod, Payload};

/// Escape applied to `=` inside query values.
const EQUALS_ESCAPE: &str = "%3D";

/// Build the content string for a request.
pub fn build_content_string(method: HttpMethod, uri: &str, payload: &Payload) -> Result<String> {
    match method {
        HttpMethod::Post => {
            let body = canonical_body(payload)?;
            let mut content = String::with_capacity(uri.len() + body.len());
            content.push_str(uri);
            content.push_str(&body);
            Ok(content)
        }
        HttpMethod::Get if payload.is_empty() => Ok(uri.to_string()),
        HttpMethod::Get => {
            let query = payload
                .iter()
                .map(|(key, value)| format!("{key}={}", query_value(value)))
                .collect::<Vec<_>>()
                .join("&");
            Ok(format!("{uri}?{query}"))
        }
    }
}

/// Compact JSON for a request body.
///
/// The body sent on the wire must be byte-identical to this string.
pub fn canonical_body(payload: &Payload) -> Result<String> {
    Ok(serde_json::to_string(payload)?)
}

/// Stringify a query value: sequences comma-joined, `=` escaped.
fn query_value(value: &Value) -> String {
    let raw = match value {
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(","),
        other => scalar_text(other),
    };
    raw.replace('=', EQUALS_ESCAPE)
}

/// Text of a single value as the page script would produce it.
///
/// Follows JavaScript `String()` and `Array.prototype.join`: booleans are
/// lowercase and `null` is empty both at top level and inside a sequence.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }

    #[test]
    fn test_get_with_sequence_and_equals() {
        let p = payload(json!({"a": "1=2", "b": [1, 2]}));
        let content = build_content_string(HttpMethod::Get, "/p", &p).unwrap();
        assert_eq!(content, "/p?a=1%3D2&b=1,2");
    }

    #[test]
    fn test_get_empty_payload() {
        let content = build_content_string(HttpMethod::Get, "/p", &Payload::new()).unwrap();
        assert_eq!(content, "/p");
    }

    #[test]
    fn test_get_does_not_url_encode() {
        let p = payload(json!({"keyword": "a b&c/中", "image_formats": ["jpg", "webp", "avif"]}));
        let content = build_content_string(HttpMethod::Get, "/s", &p).unwrap();
        assert_eq!(content, "/s?keyword=a b&c/中&image_formats=jpg,webp,avif");
    }

    #[test]
    fn test_get_scalars() {
        let p = payload(json!({"n": 30, "f": false, "x": null, "token": "ab=="}));
        let content = build_content_string(HttpMethod::Get, "/p", &p).unwrap();
        assert_eq!(content, "/p?n=30&f=false&x=&token=ab%3D%3D");
    }

    #[test]
    fn test_get_sequence_scalars_follow_page_script() {
        let p = payload(json!({"flags": [true, false], "ids": ["a", null, "b"], "r": 0.5}));
        let content = build_content_string(HttpMethod::Get, "/p", &p).unwrap();
        assert_eq!(content, "/p?flags=true,false&ids=a,,b&r=0.5");
    }

    #[test]
    fn test_post_compact_json() {
        let p = payload(json!({"a": 1}));
        let content = build_content_string(HttpMethod::Post, "/p", &p).unwrap();
        assert_eq!(content, r#"/p{"a":1}"#);
    }

    #[test]
    fn test_post_preserves_order_and_unicode() {
        let p = payload(json!({"z": "小红书", "a": [1, 2], "m": {"k": true}}));
        let content = build_content_string(HttpMethod::Post, "/p", &p).unwrap();
        assert_eq!(content, r#"/p{"z":"小红书","a":[1,2],"m":{"k":true}}"#);
    }

    #[test]
    fn test_post_empty_payload() {
        let content = build_content_string(HttpMethod::Post, "/p", &Payload::new()).unwrap();
        assert_eq!(content, "/p{}");
    }

    #[test]
    fn test_canonical_body_matches_content_suffix() {
        let p = payload(json!({"keyword": "ollama", "page": 1}));
        let body = canonical_body(&p).unwrap();
        let content = build_content_string(HttpMethod::Post, "/api", &p).unwrap();
        assert_eq!(content, format!("/api{body}"));
    }
}
