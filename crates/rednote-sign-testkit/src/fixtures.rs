//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use rednote_sign_core::{Cookies, Payload};
use rednote_sign_fingerprint::DeviceProfile;

/// A logged-in browser's cookie header.
pub const SESSION_COOKIE_HEADER: &str = "abRequestId=8a1c2f9e-3b4d-4e5f-a6b7-c8d9e0f1a2b3; \
    a1=19a0f4c1b2e3d4c5b6a7980123456789abcdef0123456789abcdef01; \
    webId=5f4dcc3b5aa765d61d8327deb882cf99; gid=yYjKqSjJ0SKJyYjKqSjJDWl8; \
    xsecappid=xhs-pc-web; webBuild=4.86.0; web_session=040069b1c2d3e4f5a6b7c8d9e0f1";

/// The same session as a browser-extension cookie export.
pub const SESSION_COOKIE_EXPORT: &str = r#"{"cookies":[
    {"name":"a1","value":"19a0f4c1b2e3d4c5b6a7980123456789abcdef0123456789abcdef01","expirationDate":1767225600.5},
    {"name":"webId","value":"5f4dcc3b5aa765d61d8327deb882cf99","expirationDate":1767225600.5},
    {"name":"xsecappid","value":"xhs-pc-web","expirationDate":1751328000.0},
    {"name":"web_session","value":"040069b1c2d3e4f5a6b7c8d9e0f1"}
]}"#;

/// A seeded generator for reproducible draws.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Session cookies parsed from [`SESSION_COOKIE_HEADER`].
pub fn session_cookies() -> Cookies {
    Cookies::parse_header(SESSION_COOKIE_HEADER)
        .unwrap_or_else(|e| panic!("fixture cookie header is invalid: {e}"))
}

/// A reproducible device.
pub fn device_profile(seed: u64) -> DeviceProfile {
    DeviceProfile::generate(&mut seeded_rng(seed))
}

/// Body of a homefeed page request. Page 0 is served with the HTML.
pub fn homefeed_payload(page: u32, cursor_score: &str, note_index: u32) -> Payload {
    let num = 30;
    let refresh_type = if page == 1 { 1 } else { 3 };
    let payload = json!({
        "category": "homefeed_recommend",
        "cursor_score": cursor_score,
        "image_formats": ["jpg", "webp", "avif"],
        "need_num": num - 25,
        "note_index": note_index + num as u32 * page.saturating_sub(1),
        "num": num,
        "refresh_type": refresh_type,
        "search_key": "",
        "unread_begin_note_id": "",
        "unread_end_note_id": "",
        "unread_note_count": 0,
        "need_filter_image": false,
    });
    into_payload(payload)
}

/// Body of a note search request.
pub fn search_payload(keyword: &str, page: u32, search_id: &str) -> Payload {
    let payload = json!({
        "ext_flags": [],
        "image_formats": ["jpg", "webp", "avif"],
        "keyword": keyword,
        "note_type": 0,
        "page": page + 1,
        "page_size": 20,
        "search_id": search_id,
        "sort": "general",
    });
    into_payload(payload)
}

fn into_payload(value: serde_json::Value) -> Payload {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Payload::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_cookies() {
        let cookies = session_cookies();
        assert_eq!(cookies.get("xsecappid"), Some("xhs-pc-web"));
        let exported = Cookies::from_export_json(SESSION_COOKIE_EXPORT).unwrap();
        assert_eq!(exported.get("a1"), cookies.get("a1"));
    }

    #[test]
    fn test_homefeed_payload_key_order() {
        let keys: Vec<_> = homefeed_payload(2, "cursor", 10).keys().cloned().collect();
        assert_eq!(keys.first().map(String::as_str), Some("category"));
        assert_eq!(keys.last().map(String::as_str), Some("need_filter_image"));
        assert_eq!(homefeed_payload(2, "", 10)["note_index"], 40);
        assert_eq!(homefeed_payload(1, "", 0)["refresh_type"], 1);
    }
}
