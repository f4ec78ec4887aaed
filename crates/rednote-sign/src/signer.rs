//! The signer: x-s, x-s-common and the full header set.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace};

use rednote_sign_core::{
    build_content_string, build_frame, canonical_body, crc32_signed_str, encode_frame,
    trace_id_16_hex, xray_trace_id, CodecTable, Cookies, FrameNonce, HttpMethod, SignError,
    SigningContext, DEVICE_ID_COOKIE, GENERAL_ALPHABET,
};
use rednote_sign_fingerprint::{generate_b1, DeviceProfile, Fingerprint};

use crate::config::SignerConfig;
use crate::error::Result;

/// Prefix of every `x-s` value.
pub const XS_PREFIX: &str = "XYS_";

/// Prefix of the encoded frame inside the `x-s` envelope.
pub const FRAME_PREFIX: &str = "mns0301_";

/// Header names, in emission order.
pub mod header {
    pub const X_T: &str = "x-t";
    pub const X_S: &str = "x-s";
    pub const X_S_COMMON: &str = "x-s-common";
    pub const X_B3_TRACEID: &str = "x-b3-traceid";
    pub const X_XRAY_TRACEID: &str = "x-xray-traceid";
    pub const CONTENT_LENGTH: &str = "content-length";
}

/// `x-s` envelope before encoding.
#[derive(Serialize)]
struct SignatureEnvelope<'a> {
    x0: &'a str,
    x1: &'a str,
    x2: &'a str,
    x3: String,
    x4: &'a str,
}

/// `x-s-common` envelope before encoding.
#[derive(Serialize)]
struct CommonSignatureEnvelope<'a> {
    s0: u32,
    s1: &'a str,
    x0: &'a str,
    x1: &'a str,
    x2: &'a str,
    x3: &'a str,
    x4: &'a str,
    x5: &'a str,
    x6: &'a str,
    x7: &'a str,
    x8: &'a str,
    x9: i32,
    x10: u32,
    x11: &'a str,
}

/// Headers and body for one outgoing request.
///
/// The body, when present, is byte-identical to the JSON that was signed.
/// Sending a re-serialized payload instead invalidates `x-s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl SignedRequest {
    /// Look up a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Stateless request signer.
///
/// Holds only configuration, so one signer can be shared across threads.
/// Session-level device stability lives in [`crate::SigningSession`].
#[derive(Debug, Clone, Default)]
pub struct Signer {
    config: SignerConfig,
}

impl Signer {
    /// Create a signer.
    pub fn new(config: SignerConfig) -> Self {
        Self { config }
    }

    /// The signer's configuration.
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // x-s
    // ---------------------------------------------------------------------

    /// Produce `x-s` for a request.
    pub fn sign_xs(&self, ctx: &SigningContext) -> Result<String> {
        self.sign_xs_with_rng(ctx, &mut rand::thread_rng())
    }

    /// Produce `x-s`, drawing the frame nonce from `rng`.
    pub fn sign_xs_with_rng<R: Rng + ?Sized>(
        &self,
        ctx: &SigningContext,
        rng: &mut R,
    ) -> Result<String> {
        let nonce = FrameNonce::generate(rng);
        self.sign_xs_with_nonce(ctx, &nonce)
    }

    /// Produce `x-s` from an explicit nonce. Pure.
    pub fn sign_xs_with_nonce(&self, ctx: &SigningContext, nonce: &FrameNonce) -> Result<String> {
        let content = build_content_string(ctx.method, &ctx.uri, &ctx.payload)?;
        let frame = build_frame(&content, &ctx.a1, &ctx.app_id, ctx.timestamp_millis, nonce);
        let encoded_frame = encode_frame(&frame);
        trace!(content_len = content.len(), frame_len = encoded_frame.len(), "built frame");

        let envelope = SignatureEnvelope {
            x0: &self.config.sdk_version,
            x1: &ctx.app_id,
            x2: &self.config.platform,
            x3: format!("{FRAME_PREFIX}{encoded_frame}"),
            x4: "",
        };
        let json = serde_json::to_string(&envelope).map_err(SignError::from)?;

        debug!(method = %ctx.method, uri = %ctx.uri, content_len = content.len(), "signed x-s");
        Ok(format!("{XS_PREFIX}{}", GENERAL_ALPHABET.encode(json.as_bytes())))
    }

    // ---------------------------------------------------------------------
    // x-s-common
    // ---------------------------------------------------------------------

    /// Produce `x-s-common` with a freshly drawn device.
    pub fn sign_xs_common(
        &self,
        cookies: &Cookies,
        user_agent: &str,
        timestamp_millis: u64,
    ) -> Result<String> {
        self.sign_xs_common_with_rng(cookies, user_agent, timestamp_millis, &mut rand::thread_rng())
    }

    /// Produce `x-s-common`, drawing a device and fingerprint from `rng`.
    pub fn sign_xs_common_with_rng<R: Rng + ?Sized>(
        &self,
        cookies: &Cookies,
        user_agent: &str,
        timestamp_millis: u64,
        rng: &mut R,
    ) -> Result<String> {
        cookies.require(DEVICE_ID_COOKIE)?;
        let fp = Fingerprint::generate(cookies, user_agent, timestamp_millis, rng);
        self.sign_xs_common_from_fingerprint(cookies, &fp)
    }

    /// Produce `x-s-common` for a known device.
    pub fn sign_xs_common_with_profile<R: Rng + ?Sized>(
        &self,
        cookies: &Cookies,
        profile: &DeviceProfile,
        user_agent: &str,
        timestamp_millis: u64,
        rng: &mut R,
    ) -> Result<String> {
        cookies.require(DEVICE_ID_COOKIE)?;
        let fp = Fingerprint::from_profile(profile, cookies, user_agent, timestamp_millis, rng);
        self.sign_xs_common_from_fingerprint(cookies, &fp)
    }

    /// Produce `x-s-common` from a finished fingerprint. Pure.
    pub fn sign_xs_common_from_fingerprint(
        &self,
        cookies: &Cookies,
        fp: &Fingerprint,
    ) -> Result<String> {
        let a1 = cookies.require(DEVICE_ID_COOKIE)?;
        let b1 = generate_b1(fp)?;
        let envelope = CommonSignatureEnvelope {
            s0: 5,
            s1: "",
            x0: "1",
            x1: &self.config.sdk_version,
            x2: &self.config.platform,
            x3: &self.config.app_id,
            x4: &self.config.web_build,
            x5: a1,
            x6: "",
            x7: "",
            x8: &b1,
            x9: crc32_signed_str(&b1),
            x10: 0,
            x11: "normal",
        };
        let json = serde_json::to_string(&envelope).map_err(SignError::from)?;

        debug!(b1_len = b1.len(), "signed x-s-common");
        Ok(GENERAL_ALPHABET.encode(json.as_bytes()))
    }

    // ---------------------------------------------------------------------
    // Full request
    // ---------------------------------------------------------------------

    /// Sign a request with a freshly drawn device.
    pub fn sign_request(&self, ctx: &SigningContext, cookies: &Cookies) -> Result<SignedRequest> {
        self.sign_request_with_rng(ctx, cookies, None, &mut rand::thread_rng())
    }

    /// Sign a request, reusing `profile` when given.
    ///
    /// Every header is computed before any is emitted, so a failure never
    /// yields a partial header set.
    pub fn sign_request_with_rng<R: Rng + ?Sized>(
        &self,
        ctx: &SigningContext,
        cookies: &Cookies,
        profile: Option<&DeviceProfile>,
        rng: &mut R,
    ) -> Result<SignedRequest> {
        let ts = ctx.timestamp_millis;
        let user_agent = &self.config.user_agent;

        let xs = self.sign_xs_with_rng(ctx, rng)?;
        let xs_common = match profile {
            Some(profile) => {
                self.sign_xs_common_with_profile(cookies, profile, user_agent, ts, rng)?
            }
            None => self.sign_xs_common_with_rng(cookies, user_agent, ts, rng)?,
        };
        let b3 = trace_id_16_hex(rng);
        let xray = xray_trace_id(rng, ts);

        let body = match ctx.method {
            HttpMethod::Post => Some(canonical_body(&ctx.payload)?),
            HttpMethod::Get => None,
        };

        let mut headers = vec![
            (header::X_T, ts.to_string()),
            (header::X_S, xs),
            (header::X_S_COMMON, xs_common),
            (header::X_B3_TRACEID, b3),
            (header::X_XRAY_TRACEID, xray),
        ];
        if let Some(body) = &body {
            headers.push((header::CONTENT_LENGTH, body.len().to_string()));
        }

        Ok(SignedRequest { headers, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::{json, Value};

    const A1: &str = "19a0f4c1b2e3d4c5b6a7980123456789abcdef0123456789abcdef01";

    fn cookies() -> Cookies {
        Cookies::parse_header(&format!("a1={A1}; webId=abc; xsecappid=xhs-pc-web")).unwrap()
    }

    fn post_ctx() -> SigningContext {
        let payload = json!({"num": 30, "refresh_type": 1});
        SigningContext::new(
            HttpMethod::Post,
            "/api/sns/web/v1/homefeed",
            payload.as_object().unwrap().clone(),
            A1,
            "xhs-pc-web",
            1_736_870_400_123,
        )
        .unwrap()
    }

    fn decode_general(text: &str) -> Value {
        serde_json::from_slice(&GENERAL_ALPHABET.decode(text).unwrap()).unwrap()
    }

    #[test]
    fn test_xs_envelope_shape() {
        let signer = Signer::default();
        let xs = signer.sign_xs_with_rng(&post_ctx(), &mut StdRng::seed_from_u64(1)).unwrap();
        let envelope = decode_general(xs.strip_prefix(XS_PREFIX).unwrap());

        assert_eq!(envelope["x0"], "4.2.6");
        assert_eq!(envelope["x1"], "xhs-pc-web");
        assert_eq!(envelope["x2"], "Windows");
        assert_eq!(envelope["x4"], "");
        let x3 = envelope["x3"].as_str().unwrap();
        assert!(x3.starts_with(FRAME_PREFIX));
        // 124 bytes -> 168 symbols including padding
        assert_eq!(x3.len(), FRAME_PREFIX.len() + 168);
    }

    #[test]
    fn test_xs_common_envelope_shape() {
        let signer = Signer::default();
        let xsc = signer
            .sign_xs_common_with_rng(&cookies(), "ua", 1_736_870_400_123, &mut StdRng::seed_from_u64(2))
            .unwrap();
        let envelope = decode_general(&xsc);

        let keys: Vec<_> = envelope.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            ["s0", "s1", "x0", "x1", "x2", "x3", "x4", "x5", "x6", "x7", "x8", "x9", "x10", "x11"]
        );
        assert_eq!(envelope["s0"], 5);
        assert_eq!(envelope["x4"], "4.86.0");
        assert_eq!(envelope["x5"], A1);
        assert_eq!(envelope["x10"], 0);
        assert_eq!(envelope["x11"], "normal");
        let b1 = envelope["x8"].as_str().unwrap();
        assert_eq!(envelope["x9"], crc32_signed_str(b1));
    }

    #[test]
    fn test_xs_common_requires_a1() {
        let signer = Signer::default();
        let cookies = Cookies::parse_header("webId=abc; xsecappid=xhs-pc-web").unwrap();
        let err = signer.sign_xs_common(&cookies, "ua", 1).unwrap_err();
        assert!(err.is_missing_credential());
        assert!(matches!(
            err,
            crate::SignerError::Sign(SignError::MissingCredential(ref name)) if name == "a1"
        ));
    }

    #[test]
    fn test_post_request_headers() {
        let signer = Signer::default();
        let signed = signer
            .sign_request_with_rng(&post_ctx(), &cookies(), None, &mut StdRng::seed_from_u64(3))
            .unwrap();

        let names: Vec<_> = signed.headers.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            ["x-t", "x-s", "x-s-common", "x-b3-traceid", "x-xray-traceid", "content-length"]
        );
        assert_eq!(signed.header("x-t"), Some("1736870400123"));
        assert_eq!(signed.body.as_deref(), Some(r#"{"num":30,"refresh_type":1}"#));
        assert_eq!(signed.header("Content-Length"), Some("27"));
        assert_eq!(signed.header("x-b3-traceid").map(str::len), Some(16));
        assert_eq!(signed.header("x-xray-traceid").map(str::len), Some(32));
    }

    #[test]
    fn test_get_request_has_no_body() {
        let signer = Signer::default();
        let payload = json!({"note_id": "abc", "image_formats": ["jpg", "webp"]});
        let ctx = SigningContext::new(
            HttpMethod::Get,
            "https://edith.xiaohongshu.com/api/sns/web/v1/feed?stale=1",
            payload.as_object().unwrap().clone(),
            A1,
            "xhs-pc-web",
            1_700_000_000_000,
        )
        .unwrap();
        let signed = signer
            .sign_request_with_rng(&ctx, &cookies(), None, &mut StdRng::seed_from_u64(4))
            .unwrap();

        assert_eq!(signed.body, None);
        assert_eq!(signed.header("content-length"), None);
        assert_eq!(signed.headers.len(), 5);
    }

    #[test]
    fn test_missing_a1_emits_nothing() {
        let signer = Signer::default();
        let cookies = Cookies::parse_header("webId=abc").unwrap();
        let result =
            signer.sign_request_with_rng(&post_ctx(), &cookies, None, &mut StdRng::seed_from_u64(5));
        assert!(result.unwrap_err().is_missing_credential());
    }

    #[test]
    fn test_profile_signing_tracks_timestamp() {
        let signer = Signer::default();
        let mut rng = StdRng::seed_from_u64(6);
        let profile = DeviceProfile::generate(&mut rng);

        let b1_of = |xsc: &str| {
            let envelope = decode_general(xsc);
            let json = rednote_sign_fingerprint::decode_b1(envelope["x8"].as_str().unwrap())
                .unwrap();
            serde_json::from_str::<Value>(&json).unwrap()
        };
        let a = signer
            .sign_xs_common_with_profile(&cookies(), &profile, "ua", 1, &mut rng)
            .unwrap();
        let b = signer
            .sign_xs_common_with_profile(&cookies(), &profile, "ua", 2, &mut rng)
            .unwrap();
        assert_eq!(b1_of(&a)["x44"], "1");
        assert_eq!(b1_of(&b)["x44"], "2");
    }

    #[test]
    fn test_config_flows_into_envelopes() {
        let signer = Signer::new(SignerConfig {
            sdk_version: "9.9.9".to_string(),
            web_build: "5.0.0".to_string(),
            ..SignerConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(7);
        let xs = signer.sign_xs_with_rng(&post_ctx(), &mut rng).unwrap();
        let xsc = signer.sign_xs_common_with_rng(&cookies(), "ua", 1, &mut rng).unwrap();

        assert_eq!(decode_general(&xs[XS_PREFIX.len()..])["x0"], "9.9.9");
        assert_eq!(decode_general(&xsc)["x1"], "9.9.9");
        assert_eq!(decode_general(&xsc)["x4"], "5.0.0");
    }
}
