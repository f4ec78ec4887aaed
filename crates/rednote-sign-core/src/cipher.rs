//! RC4 stream cipher.
//!
//! Used exactly once per x-s-common, to encrypt the b1 fingerprint subset
//! under the fixed key [`B1_CIPHER_KEY`]. Encryption and decryption are the
//! same operation.

use ::rc4::cipher::Key;
use ::rc4::consts::U12;
use ::rc4::{KeyInit, Rc4, StreamCipher};

/// Key shared by every client for b1 encryption.
pub const B1_CIPHER_KEY: &[u8; 12] = b"xhswebmplfbt";

/// RC4 keyed with [`B1_CIPHER_KEY`].
pub type B1Cipher = Rc4<U12>;

/// Encrypt (or decrypt) `data` with a freshly keyed stream cipher `C`.
pub fn rc4<C: KeyInit + StreamCipher>(key: &Key<C>, data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    C::new(key).apply_keystream(&mut out);
    out
}

/// Encrypt (or decrypt) `data` under the b1 key.
pub fn b1_cipher(data: &[u8]) -> Vec<u8> {
    rc4::<B1Cipher>(B1_CIPHER_KEY.into(), data)
}
