//! The `b1` blob: an encrypted projection of the fingerprint.
//!
//! Pipeline: projection JSON -> RC4 -> Latin-1 text -> percent-escape ->
//! unescape to bytes -> general alphabet.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::trace;

use rednote_sign_core::{b1_cipher, CodecTable, Result, SignError, GENERAL_ALPHABET};

use crate::fingerprint::Fingerprint;

/// Characters left unescaped: alphanumerics plus `!*'()~_-.`.
const B1_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'~')
    .remove(b'_')
    .remove(b'-')
    .remove(b'.');

/// The 18 fingerprint fields carried in `b1`, in wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct B1Fields<'a> {
    pub x33: &'a str,
    pub x34: &'a str,
    pub x35: &'a str,
    pub x36: &'a str,
    pub x37: &'a str,
    pub x38: &'a str,
    pub x39: u32,
    pub x42: &'a str,
    pub x43: &'a str,
    pub x44: &'a str,
    pub x45: &'a str,
    pub x46: &'a str,
    pub x48: &'a str,
    pub x49: &'a str,
    pub x50: &'a str,
    pub x51: &'a str,
    pub x52: &'a str,
    pub x82: &'a str,
}

impl<'a> From<&'a Fingerprint> for B1Fields<'a> {
    fn from(fp: &'a Fingerprint) -> Self {
        Self {
            x33: fp.automation_a,
            x34: fp.automation_b,
            x35: fp.automation_c,
            x36: &fp.history_length,
            x37: fp.feature_bits,
            x38: fp.api_bits,
            x39: fp.canvas_noise,
            x42: fp.sdk_version,
            x43: fp.sdk_hash,
            x44: &fp.timestamp,
            x45: fp.security_markers,
            x46: fp.devtools_open,
            x48: fp.reserved_48,
            x49: fp.injected_list,
            x50: fp.reserved_50,
            x51: fp.reserved_51,
            x52: fp.reserved_52,
            x82: fp.obfuscation_markers,
        }
    }
}

/// Build `b1` from a fingerprint.
pub fn generate_b1(fp: &Fingerprint) -> Result<String> {
    encode_b1_fields(&B1Fields::from(fp))
}

/// Build `b1` from an explicit projection.
pub fn encode_b1_fields(fields: &B1Fields<'_>) -> Result<String> {
    let json = serde_json::to_string(fields)?;
    let ciphertext = b1_cipher(json.as_bytes());
    let bytes = escape_roundtrip(&ciphertext);
    trace!(json_len = json.len(), wire_len = bytes.len(), "encoded b1");
    Ok(GENERAL_ALPHABET.encode(&bytes))
}

/// Recover the projection JSON from a `b1` string.
pub fn decode_b1(b1: &str) -> Result<String> {
    let bytes = GENERAL_ALPHABET.decode(b1)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| SignError::AlphabetDecode(format!("b1 is not UTF-8: {e}")))?;
    let ciphertext = text
        .chars()
        .map(|c| u8::try_from(u32::from(c)))
        .collect::<std::result::Result<Vec<u8>, _>>()
        .map_err(|_| SignError::AlphabetDecode("b1 holds a non-Latin-1 character".into()))?;
    let plaintext = b1_cipher(&ciphertext);
    String::from_utf8(plaintext).map_err(|e| SignError::Encoding(e.to_string()))
}

/// Read ciphertext bytes as Latin-1, percent-escape the UTF-8 form, then
/// unescape every `%XX` and literal character back to bytes.
fn escape_roundtrip(ciphertext: &[u8]) -> Vec<u8> {
    let latin1: String = ciphertext.iter().map(|&b| char::from(b)).collect();
    let escaped = utf8_percent_encode(&latin1, B1_ESCAPE).to_string();
    percent_decode_str(&escaped).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rednote_sign_core::Cookies;

    const GOLDEN_B1: &str = "I38rHdgsjopgIvesdVwgIC+oIELmBZ5e3VwXLgFTIxS3bqwErFeexd0ekncAzMFYnqthIhJe\
DBMDKutRI3KsYorWHPtGrbV0P9WfIi/eWc6eYqtyQApPI37ekmR6QL+5Ii6sdnoeSfqYHqwl2qt5B0DoIx+PGDi/sVtkIxds\
xuwr4qtiIhuaIE3e3LV0I3VTIC7e0utl2ADmsLveDSKsSPw5IEvsiVtJOqw8BuwfPpdeTFWOIx4TIiu6ZPwrPut5IvlaLbgs\
3qtxIxes1VwHIkumIkIyejgsY/WTge7eSqte/D7sDcpipedeYrDtIC6eDVw2IENsSqtlnlSuNjVtIvoekqt3cZ7sVo4gIESy\
IEle+AFDI3EPKI8BIiWIZPwAIvGj4sesYINsxVwSIC7ef96e0fhPIive6WrS8qwUIE7s1f0s6WAeiVtwpjNeYuw9IvYczAde\
duwCpnJsWVw8IxI2I38isqwZgVtI4LTjoAve6peeYqwxIvAeS0Os1DZiIi7sjbos3amyIv6sdqwaICmygVtxgVw4IE7sVVtF\
IiAsiqtSIENsdutSHuwPnVtdIxkhIvVr27lk2Ive1utCIEDtIkJeYut4bYRtn/0ejgI7Ih4s2uwfJPwSI35skqwWGD5s6WAs\
3phwIhos3fOs3utscPwaICJsWPw5IiJekeqLICKejd/sfPtUIx7sxuwD4BYaIhQgIv5s1M6e6gvsiLdedVtsIkYTI3ilJutp\
IxElIEvsxbr38W==";

    fn golden_fingerprint() -> Fingerprint {
        let mut rng = StdRng::seed_from_u64(1);
        let mut fp = Fingerprint::generate(&Cookies::new(), "ua", 1_736_870_400_123, &mut rng);
        fp.history_length = "7".to_string();
        fp
    }

    #[test]
    fn test_golden_b1() {
        assert_eq!(generate_b1(&golden_fingerprint()).unwrap(), GOLDEN_B1);
    }

    #[test]
    fn test_projection_key_order() {
        let fp = golden_fingerprint();
        let json = serde_json::to_string(&B1Fields::from(&fp)).unwrap();
        assert!(json.starts_with(r#"{"x33":"0","x34":"0","x35":"0","x36":"7","#));
        assert!(json.contains(r#""x39":0,"x42":"3.4.4""#));
        assert!(json.contains(r#""x46":"false","x48":"""#));
        assert!(json.ends_with(r#""x82":"_0x17a2|_0x1954"}"#));
    }

    #[test]
    fn test_decode_recovers_projection() {
        let fp = golden_fingerprint();
        let json = decode_b1(GOLDEN_B1).unwrap();
        let fields: B1Fields<'_> = serde_json::from_str(&json).unwrap();
        assert_eq!(fields, B1Fields::from(&fp));
        assert_eq!(fields.x44, "1736870400123");
    }

    #[test]
    fn test_escape_keeps_leading_literals() {
        // 'a' and '(' are unreserved, 0xE9 becomes two UTF-8 bytes.
        assert_eq!(escape_roundtrip(b"a(\xe9"), vec![b'a', b'(', 0xc3, 0xa9]);
        assert_eq!(escape_roundtrip(b" /"), b" /".to_vec());
    }

    #[test]
    fn test_decode_rejects_foreign_symbols() {
        assert!(matches!(decode_b1("!!!!"), Err(SignError::AlphabetDecode(_))));
    }

    proptest! {
        #[test]
        fn escape_is_utf8_of_latin1(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
            let latin1: String = bytes.iter().map(|&b| char::from(b)).collect();
            prop_assert_eq!(escape_roundtrip(&bytes), latin1.into_bytes());
        }
    }
}
