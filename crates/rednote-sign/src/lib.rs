//! # Rednote Sign
//!
//! Request signing for the rednote (Xiaohongshu) web API.
//!
//! ## Overview
//!
//! Every API call carries two signature headers that the server checks
//! before answering:
//!
//! - **x-s**: a 124-byte binary frame (timestamps, content digest, device
//!   id, app id) XOR-masked and wrapped in a JSON envelope
//! - **x-s-common**: a JSON envelope around `b1`, an RC4-encrypted
//!   projection of a synthetic browser fingerprint, plus its CRC32
//!
//! Both are encoded with custom base64 alphabets. The [`Signer`] also emits
//! `x-t`, `x-b3-traceid`, `x-xray-traceid` and, for POST, `content-length`
//! together with the exact body that was signed.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rednote_sign::{Signer, SignerConfig, SigningSession};
//! use rednote_sign::core::{Cookies, HttpMethod};
//! use serde_json::json;
//!
//! let cookies = Cookies::parse_header("a1=...; webId=...; xsecappid=xhs-pc-web").unwrap();
//! let session = SigningSession::new(Signer::new(SignerConfig::default()), cookies, 0).unwrap();
//!
//! let payload = json!({"num": 18, "refresh_type": 1});
//! let signed = session
//!     .sign_request(
//!         HttpMethod::Post,
//!         "/api/sns/web/v1/homefeed",
//!         payload.as_object().unwrap().clone(),
//!         1_736_870_400_123,
//!     )
//!     .unwrap();
//!
//! for (name, value) in &signed.headers {
//!     println!("{name}: {value}");
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `rednote_sign::core` - codecs, checksum, cipher, frame, cookies
//! - `rednote_sign::fingerprint` - device profiles, fingerprints, `b1`

pub mod config;
pub mod error;
pub mod session;
pub mod signer;

pub use rednote_sign_core as core;
pub use rednote_sign_fingerprint as fingerprint;

pub use config::SignerConfig;
pub use error::{Result, SignerError};
pub use session::SigningSession;
pub use signer::{SignedRequest, Signer, FRAME_PREFIX, XS_PREFIX};

pub use rednote_sign_core::{Cookies, FrameNonce, HttpMethod, Payload, SignError, SigningContext};
pub use rednote_sign_fingerprint::{DeviceProfile, Fingerprint};
