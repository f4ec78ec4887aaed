//! JS-compatible CRC32.
//!
//! The platform computes an IEEE CRC32 (reflected polynomial `0xEDB88320`,
//! init and final XOR `0xFFFFFFFF`) in JavaScript, where bitwise results are
//! signed 32-bit integers. The checksum embedded in x-s-common is therefore
//! the signed reinterpretation of the standard value.

/// CRC32 of raw bytes, reinterpreted as a signed 32-bit integer.
pub fn crc32_signed(bytes: &[u8]) -> i32 {
    crc32fast::hash(bytes) as i32
}

/// CRC32 of the UTF-8 encoding of `text`, as a signed 32-bit integer.
pub fn crc32_signed_str(text: &str) -> i32 {
    crc32_signed(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(crc32_signed(b""), 0);
    }

    #[test]
    fn test_check_value() {
        // 0xCBF43926 reinterpreted as i32
        assert_eq!(crc32_signed(b"123456789"), 0xCBF4_3926u32 as i32);
        assert_eq!(crc32_signed(b"123456789"), -873_187_034);
    }

    #[test]
    fn test_positive_values_unchanged() {
        assert_eq!(crc32_signed(b"hello"), 907_060_870);
    }

    #[test]
    fn test_utf8_input() {
        assert_eq!(crc32_signed_str("你好"), 1_352_841_281);
    }
}
