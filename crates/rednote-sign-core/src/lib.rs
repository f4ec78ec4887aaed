//! # Rednote Sign Core
//!
//! Pure primitives for signing rednote web API requests: the three
//! alphabet codecs, the JS-compatible CRC32, the RC4 stream cipher, the
//! content string and the 124-byte binary frame.
//!
//! This crate performs no I/O. Randomness is always drawn from a caller-
//! supplied [`rand::Rng`], so every output is reproducible under a seeded
//! generator.
//!
//! ## Key Types
//!
//! - [`SigningContext`] - method, path, payload, credentials and timestamp
//! - [`Cookies`] - ordered session cookie jar
//! - [`AlphabetTable`] - a base64 symbol permutation ([`CodecTable`])
//! - [`FrameNonce`] - the random draws behind one binary frame

pub mod checksum;
pub mod cipher;
pub mod codec;
pub mod content;
pub mod cookies;
pub mod error;
pub mod frame;
pub mod trace;
pub mod types;

pub use checksum::{crc32_signed, crc32_signed_str};
pub use cipher::{b1_cipher, rc4, B1Cipher, B1_CIPHER_KEY};
pub use codec::{AlphabetTable, CodecTable, FRAME_ALPHABET, GENERAL_ALPHABET, STANDARD_ALPHABET};
pub use content::{build_content_string, canonical_body};
pub use cookies::{Cookie, Cookies, EXPIRY_GRACE_SECS};
pub use error::{Result, SignError};
pub use frame::{build_frame, encode_frame, xor_frame, FrameNonce, FRAME_LEN};
pub use trace::{base36_encode, search_id, trace_id_16_hex, xray_trace_id};
pub use types::{HttpMethod, Payload, SigningContext, APP_ID_COOKIE, DEVICE_ID_COOKIE};
