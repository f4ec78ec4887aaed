//! Alphabet codec: base64 with platform-specific symbol tables.
//!
//! Grouping and padding are standard base64 (4 symbols per 3 bytes, `=`
//! padding). Only the 64-symbol alphabet changes. Three tables exist:
//!
//! - [`STANDARD_ALPHABET`] - the RFC 4648 alphabet, the identity mapping
//! - [`FRAME_ALPHABET`] - used only for the 124-byte binary frame (x-s `x3`)
//! - [`GENERAL_ALPHABET`] - used for both JSON envelopes and for b1
//!
//! The tables are protocol constants. Changing a single symbol makes the
//! server reject every signature.

use base64::alphabet::Alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::Engine as _;

use crate::error::Result;

/// Symbols of the frame alphabet, in standard-alphabet index order.
pub const FRAME_SYMBOLS: &str = "MfgqrsbcyzPQRStuvC7mn501HIJBo2DEFTKdeNOwxWXYZap89+/A4UVLhijkl63G";

/// Symbols of the general alphabet, in standard-alphabet index order.
pub const GENERAL_SYMBOLS: &str = "ZmserbBoHQtNP+wOcza/LpngG8yJq42KWYj0DSfdikx3VT16IlUAFM97hECvuRX5";

/// Symbols of the standard alphabet.
pub const STANDARD_SYMBOLS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// The RFC 4648 table.
pub static STANDARD_ALPHABET: AlphabetTable = AlphabetTable::new("standard", STANDARD_SYMBOLS);

/// The table for the binary frame.
pub static FRAME_ALPHABET: AlphabetTable = AlphabetTable::new("frame", FRAME_SYMBOLS);

/// The table for JSON envelopes and b1.
pub static GENERAL_ALPHABET: AlphabetTable = AlphabetTable::new("general", GENERAL_SYMBOLS);

/// A bijective byte <-> text codec.
///
/// `decode(encode(b)) == b` holds for every byte sequence `b`.
pub trait CodecTable {
    /// Encode bytes to padded text.
    fn encode(&self, bytes: &[u8]) -> String;

    /// Decode padded text back to bytes.
    fn decode(&self, text: &str) -> Result<Vec<u8>>;
}

/// An immutable permutation of the 64 base64 symbols.
#[derive(Debug, Clone)]
pub struct AlphabetTable {
    name: &'static str,
    symbols: &'static str,
    engine: GeneralPurpose,
}

impl AlphabetTable {
    /// Build a table from 64 distinct symbols.
    ///
    /// Panics at compile time when used in a `static` with an invalid
    /// alphabet (duplicate symbols, `=` or non-printable characters).
    pub const fn new(name: &'static str, symbols: &'static str) -> Self {
        let alphabet = match Alphabet::new(symbols) {
            Ok(alphabet) => alphabet,
            Err(_) => panic!("alphabet must be 64 distinct printable symbols"),
        };
        Self {
            name,
            symbols,
            engine: GeneralPurpose::new(&alphabet, PAD),
        }
    }

    /// Human-readable table name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The 64 symbols in standard-index order.
    pub const fn symbols(&self) -> &'static str {
        self.symbols
    }
}

impl CodecTable for AlphabetTable {
    fn encode(&self, bytes: &[u8]) -> String {
        self.engine.encode(bytes)
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>> {
        Ok(self.engine.decode(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignError;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn tables() -> [&'static AlphabetTable; 3] {
        [&STANDARD_ALPHABET, &FRAME_ALPHABET, &GENERAL_ALPHABET]
    }

    #[test]
    fn test_tables_are_permutations() {
        let standard: HashSet<char> = STANDARD_SYMBOLS.chars().collect();
        for table in tables() {
            let symbols: HashSet<char> = table.symbols().chars().collect();
            assert_eq!(symbols.len(), 64, "table {} has duplicates", table.name());
            assert_eq!(symbols, standard, "table {} is not a permutation", table.name());
        }
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(STANDARD_ALPHABET.encode(b"hello"), "aGVsbG8=");
        assert_eq!(FRAME_ALPHABET.encode(b"hello"), "Jb5ZBbl=");
        assert_eq!(GENERAL_ALPHABET.encode(b"hello"), "yBpVJBu=");

        assert_eq!(FRAME_ALPHABET.encode(&[0x00, 0xff, 0x10]), "Mulv");
        assert_eq!(GENERAL_ALPHABET.encode(&[0x00, 0xff, 0x10]), "ZOuc");
        assert_eq!(GENERAL_ALPHABET.encode(br#"{"a":1}"#), "2UQYH0ilKc==");
    }

    #[test]
    fn test_empty_input() {
        for table in tables() {
            assert_eq!(table.encode(b""), "");
            assert_eq!(table.decode("").unwrap(), Vec::<u8>::new());
        }
    }

    #[test]
    fn test_decode_rejects_foreign_symbols() {
        let err = GENERAL_ALPHABET.decode("ab!d").unwrap_err();
        assert!(matches!(err, SignError::AlphabetDecode(_)));
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        assert!(FRAME_ALPHABET.decode("Jb5").is_err());
    }

    proptest! {
        #[test]
        fn test_roundtrip_all_tables(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            for table in tables() {
                let text = table.encode(&bytes);
                prop_assert_eq!(text.len() % 4, 0);
                prop_assert_eq!(table.decode(&text).unwrap(), bytes.clone());
            }
        }
    }
}
