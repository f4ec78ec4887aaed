//! Golden vectors for the full signing pipeline.
//!
//! Every value here is what the server accepts for the given inputs. Any
//! change to codecs, frame layout, envelopes or the b1 pipeline shows up
//! as a mismatch.

use rednote_sign::core::{
    build_content_string, build_frame, crc32_signed_str, encode_frame, CodecTable,
    GENERAL_ALPHABET,
};
use rednote_sign::fingerprint::{decode_b1, generate_b1};
use rednote_sign::{Signer, FRAME_PREFIX, XS_PREFIX};
use rednote_sign_testkit::{common_vectors, xs_vectors};
use serde_json::Value;

#[test]
fn golden_content_strings() {
    for v in xs_vectors() {
        let ctx = v.context();
        let content = build_content_string(ctx.method, &ctx.uri, &ctx.payload).unwrap();
        assert_eq!(content, v.expected_content, "{}", v.name);
    }
}

#[test]
fn golden_raw_frames() {
    for v in xs_vectors() {
        let frame = build_frame(v.expected_content, v.a1, v.app_id, v.timestamp_millis, &v.nonce);
        assert_eq!(hex::encode(frame), v.expected_raw_frame, "{}", v.name);
    }
}

#[test]
fn golden_xs() {
    let signer = Signer::default();
    for v in xs_vectors() {
        let xs = signer.sign_xs_with_nonce(&v.context(), &v.nonce).unwrap();
        assert_eq!(xs, v.expected_xs, "{}", v.name);
    }
}

#[test]
fn golden_xs_embeds_encoded_frame() {
    for v in xs_vectors() {
        let frame = build_frame(v.expected_content, v.a1, v.app_id, v.timestamp_millis, &v.nonce);
        let body = GENERAL_ALPHABET
            .decode(v.expected_xs.strip_prefix(XS_PREFIX).unwrap())
            .unwrap();
        let envelope: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            envelope["x3"].as_str().unwrap(),
            format!("{FRAME_PREFIX}{}", encode_frame(&frame)),
            "{}",
            v.name
        );
        assert_eq!(envelope["x1"], v.app_id);
    }
}

#[test]
fn golden_b1_and_checksum() {
    for v in common_vectors() {
        let b1 = generate_b1(&v.fingerprint()).unwrap();
        assert_eq!(b1, v.expected_b1, "{}", v.name);
        assert_eq!(crc32_signed_str(&b1), v.expected_crc, "{}", v.name);
    }
}

#[test]
fn golden_b1_decodes_to_projection() {
    for v in common_vectors() {
        let json: Value = serde_json::from_str(&decode_b1(v.expected_b1).unwrap()).unwrap();
        assert_eq!(json["x36"], v.history_length, "{}", v.name);
        assert_eq!(json["x44"], v.timestamp_millis.to_string(), "{}", v.name);
        assert_eq!(json.as_object().unwrap().len(), 18);
    }
}

#[test]
fn golden_xs_common() {
    let signer = Signer::default();
    for v in common_vectors() {
        let xsc = signer
            .sign_xs_common_from_fingerprint(&v.cookies(), &v.fingerprint())
            .unwrap();
        assert_eq!(xsc, v.expected_xs_common, "{}", v.name);
    }
}
