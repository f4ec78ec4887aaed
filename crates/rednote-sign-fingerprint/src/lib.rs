//! # Rednote Sign Fingerprint
//!
//! Synthetic browser fingerprints and the `b1` blob derived from them.
//!
//! A [`DeviceProfile`] is the stable half (screen, GPU, per-device hashes)
//! and a [`Fingerprint`] is the full descriptor built from a profile plus the
//! session cookies, user agent and timestamp. [`generate_b1`] projects 18
//! fields of a fingerprint into the encrypted `b1` string carried by
//! `x-s-common`.
//!
//! ```rust,no_run
//! use rand::thread_rng;
//! use rednote_sign_core::Cookies;
//! use rednote_sign_fingerprint::{generate_b1, Fingerprint};
//!
//! let cookies = Cookies::parse_header("a1=abc; webId=def").unwrap();
//! let fp = Fingerprint::generate(&cookies, "Mozilla/5.0", 1_736_870_400_123, &mut thread_rng());
//! let b1 = generate_b1(&fp).unwrap();
//! ```

pub mod b1;
pub mod fingerprint;
pub mod profile;

pub use b1::{decode_b1, encode_b1_fields, generate_b1, B1Fields};
pub use fingerprint::{Fingerprint, PageInfo, TextMetrics};
pub use profile::{DeviceProfile, GpuInfo, ScreenConfig, GPUS};
