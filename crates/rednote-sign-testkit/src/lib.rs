//! # Rednote Sign Testkit
//!
//! Testing utilities for rednote request signing.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: fixed inputs with the exact `x-s`, frame, `b1` and
//!   `x-s-common` values the server accepts
//! - **Generators**: Proptest strategies for signing contexts and nonces
//! - **Fixtures**: session cookies, seeded generators and request bodies
//!
//! ## Golden Vectors
//!
//! ```rust
//! use rednote_sign_core::{build_content_string, build_frame};
//! use rednote_sign_testkit::vectors::xs_vectors;
//!
//! for v in xs_vectors() {
//!     let ctx = v.context();
//!     let content = build_content_string(ctx.method, &ctx.uri, &ctx.payload).unwrap();
//!     let frame = build_frame(&content, v.a1, v.app_id, v.timestamp_millis, &v.nonce);
//!     assert_eq!(hex::encode(frame), v.expected_raw_frame);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use rednote_sign_testkit::generators::{context_from_params, ContextParams};
//!
//! proptest! {
//!     #[test]
//!     fn signs_any_context(params: ContextParams) {
//!         let ctx = context_from_params(&params);
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{device_profile, seeded_rng, session_cookies};
pub use generators::{context_from_params, ContextParams};
pub use vectors::{common_vectors, xs_vectors, CommonVector, XsVector};
