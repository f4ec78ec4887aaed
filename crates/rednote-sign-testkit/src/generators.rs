//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Value};

use rednote_sign_core::{FrameNonce, HttpMethod, Payload, SigningContext};

/// Generate a frame nonce covering the full range of each draw.
pub fn frame_nonce() -> impl Strategy<Value = FrameNonce> {
    (0u32..i32::MAX as u32, 5u8..=255, any::<u8>(), any::<u8>()).prop_map(
        |(seed, time_offset_secs, sequence, window_props_len)| FrameNonce {
            seed,
            time_offset_secs,
            sequence,
            window_props_len,
        },
    )
}

pub fn http_method() -> impl Strategy<Value = HttpMethod> {
    prop_oneof![Just(HttpMethod::Get), Just(HttpMethod::Post)]
}

/// Realistic millisecond timestamps (2017 to 2033).
pub fn timestamp_millis() -> impl Strategy<Value = u64> {
    1_500_000_000_000u64..2_000_000_000_000
}

/// Device ids, including ones longer than the 52-byte frame slot.
pub fn a1() -> impl Strategy<Value = String> {
    "[0-9a-f]{1,80}"
}

pub fn app_id() -> impl Strategy<Value = String> {
    "[a-z][a-z-]{0,15}"
}

/// API paths.
pub fn uri() -> impl Strategy<Value = String> {
    "(/[a-z0-9_]{1,12}){1,5}"
}

/// A scalar or flat-array JSON value, including non-ASCII text.
pub fn payload_value() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-zA-Z0-9=&,_ ]{0,16}".prop_map(Value::from),
        "[\u{4e00}-\u{4e20}]{1,4}".prop_map(Value::from),
        Just(Value::Null),
    ];
    prop_oneof![
        4 => scalar,
        1 => prop::collection::vec("[a-z0-9]{1,6}", 0..4)
            .prop_map(|items| Value::Array(items.into_iter().map(Value::from).collect())),
    ]
}

/// An ordered payload with unique keys.
pub fn payload() -> impl Strategy<Value = Payload> {
    prop::collection::vec(("[a-z_]{1,12}", payload_value()), 0..8).prop_map(|entries| {
        let mut map = Map::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    })
}

/// Parameters for a signing context.
#[derive(Debug, Clone)]
pub struct ContextParams {
    pub method: HttpMethod,
    pub uri: String,
    pub payload: Payload,
    pub a1: String,
    pub app_id: String,
    pub timestamp_millis: u64,
}

impl Arbitrary for ContextParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (http_method(), uri(), payload(), a1(), app_id(), timestamp_millis())
            .prop_map(|(method, uri, payload, a1, app_id, timestamp_millis)| ContextParams {
                method,
                uri,
                payload,
                a1,
                app_id,
                timestamp_millis,
            })
            .boxed()
    }
}

/// Build a context from generated parameters.
///
/// The generators never produce empty credentials, so this cannot fail.
pub fn context_from_params(params: &ContextParams) -> SigningContext {
    SigningContext::new(
        params.method,
        &params.uri,
        params.payload.clone(),
        &params.a1,
        &params.app_id,
        params.timestamp_millis,
    )
    .unwrap_or_else(|e| panic!("generated context rejected: {e}"))
}
