//! Binary frame: the 124-byte structure behind x-s `x3`.
//!
//! Layout, in order (all integers little-endian):
//!
//! | Segment | Width | Content |
//! |---|---|---|
//! | version | 3 | `[1, 0, 0]` |
//! | seed | 4 | 31-bit random value |
//! | timestamp A | 8 | millis with byte 0 replaced by a mark, XOR `2` |
//! | timestamp B | 8 | millis minus a random 5..=255 second offset |
//! | sequence | 4 | random 0..=255 |
//! | window props length | 4 | random 0..=255 |
//! | content length | 4 | UTF-8 byte length of the content string |
//! | md5 segment | 8 | first 8 MD5 bytes XOR seed byte 0 |
//! | a1 | 1 + 52 | length byte `52`, then a1 truncated / zero-padded |
//! | app id | 1 + 10 | length byte `10`, then app id truncated / zero-padded |
//! | tail | 3 + 14 | `1`, checksum version `1`, seed byte 0 XOR `115`, fixed tail |
//!
//! The assembled frame is XORed with [`FRAME_XOR_KEY`] and encoded with the
//! frame alphabet.

use rand::Rng;

use crate::codec::{CodecTable, FRAME_ALPHABET};

/// Total frame length before and after the XOR step.
pub const FRAME_LEN: usize = 124;

/// Fixed width of the a1 segment content.
pub const A1_LEN: usize = 52;

/// Fixed width of the app id segment content.
pub const APP_ID_LEN: usize = 10;

/// Protocol version bytes.
pub const VERSION_BYTES: [u8; 3] = [1, 0, 0];

/// XOR constant for timestamp A.
pub const TIMESTAMP_XOR: u8 = 2;

/// Checksum version byte.
pub const CHECKSUM_VERSION: u8 = 1;

/// XOR constant for the checksum byte.
pub const CHECKSUM_XOR: u8 = 115;

/// Constant frame tail.
pub const FIXED_TAIL: [u8; 14] = [249, 65, 103, 103, 201, 181, 131, 99, 94, 7, 68, 250, 132, 21];

/// Byte offsets of the variable-width-looking segments.
pub mod offsets {
    pub const SEED: usize = 3;
    pub const TIMESTAMP_A: usize = 7;
    pub const TIMESTAMP_B: usize = 15;
    pub const SEQUENCE: usize = 23;
    pub const WINDOW_PROPS: usize = 27;
    pub const CONTENT_LEN: usize = 31;
    pub const MD5: usize = 35;
    pub const A1_LEN_BYTE: usize = 43;
    pub const A1: usize = 44;
    pub const APP_ID_LEN_BYTE: usize = 96;
    pub const APP_ID: usize = 97;
    pub const TAIL_START: usize = 107;
    pub const CHECKSUM_VERSION: usize = 108;
    pub const CHECKSUM_XOR: usize = 109;
    pub const FIXED_TAIL: usize = 110;
}

/// Key XORed over the assembled frame.
pub const FRAME_XOR_KEY: [u8; FRAME_LEN] = [
    0x71, 0xa3, 0x02, 0x25, 0x77, 0x93, 0x27, 0x1d, 0xdd, 0x27, 0x3b, 0xce,
    0xe3, 0xe4, 0xb9, 0x8d, 0x9d, 0x79, 0x35, 0xe1, 0xda, 0x33, 0xf5, 0x76,
    0x5e, 0x2e, 0xa8, 0xaf, 0xb6, 0xdc, 0x77, 0xa5, 0x1a, 0x49, 0x9d, 0x23,
    0xb6, 0x7c, 0x20, 0x66, 0x00, 0x25, 0x86, 0x0c, 0xbf, 0x13, 0xd4, 0x54,
    0x0d, 0x92, 0x49, 0x7f, 0x58, 0x68, 0x6c, 0x57, 0x4e, 0x50, 0x8f, 0x46,
    0xe1, 0x95, 0x63, 0x44, 0xf3, 0x91, 0x39, 0xbf, 0x4f, 0xaf, 0x22, 0xa3,
    0xee, 0xf1, 0x20, 0xb7, 0x92, 0x58, 0x14, 0x5b, 0x2f, 0xeb, 0x51, 0x93,
    0xb6, 0x47, 0x86, 0x69, 0x96, 0x12, 0x98, 0xe7, 0x9b, 0xed, 0xca, 0x64,
    0x6e, 0x1a, 0x69, 0x3a, 0x92, 0x61, 0x54, 0xa5, 0xa7, 0xa1, 0xbd, 0x1c,
    0xf0, 0xde, 0xdb, 0x74, 0x2f, 0x91, 0x7a, 0x74, 0x7a, 0x1e, 0x38, 0x8b,
    0x23, 0x4f, 0x22, 0x77,
];

/// The random draws that go into one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameNonce {
    /// 31-bit seed; byte 0 keys the md5 segment and the checksum byte.
    pub seed: u32,
    /// Seconds subtracted for timestamp B, in `5..=255`.
    pub time_offset_secs: u8,
    pub sequence: u8,
    pub window_props_len: u8,
}

impl FrameNonce {
    /// Draw a nonce from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            seed: rng.gen_range(0..i32::MAX as u32),
            time_offset_secs: rng.gen_range(5..=255),
            sequence: rng.gen(),
            window_props_len: rng.gen(),
        }
    }

    fn seed_byte(&self) -> u8 {
        self.seed.to_le_bytes()[0]
    }
}

/// Sequential writer over a fixed frame buffer.
struct FrameWriter {
    buf: [u8; FRAME_LEN],
    pos: usize,
}

impl FrameWriter {
    fn new() -> Self {
        Self {
            buf: [0u8; FRAME_LEN],
            pos: 0,
        }
    }

    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    fn put_u8(&mut self, byte: u8) {
        self.put(&[byte]);
    }

    fn put_u32(&mut self, value: u32) {
        self.put(&value.to_le_bytes());
    }

    /// A length byte followed by `bytes` truncated or zero-padded to `width`.
    fn put_fixed(&mut self, bytes: &[u8], width: usize) {
        self.put_u8(width as u8);
        let take = bytes.len().min(width);
        self.put(&bytes[..take]);
        // the buffer starts zeroed, so padding is a cursor move
        self.pos += width - take;
    }

    fn finish(self) -> [u8; FRAME_LEN] {
        debug_assert_eq!(self.pos, FRAME_LEN, "frame segments must fill the buffer");
        self.buf
    }
}

/// Timestamp A: millis LE with a mark in byte 0, then XOR [`TIMESTAMP_XOR`].
fn encrypted_timestamp(timestamp_millis: u64) -> [u8; 8] {
    let mut block = timestamp_millis.to_le_bytes();
    let mark = block[1..8]
        .iter()
        .fold(0u8, |acc, b| acc.wrapping_add(*b));
    block[0] = mark;
    for byte in block.iter_mut() {
        *byte ^= TIMESTAMP_XOR;
    }
    block
}

/// Assemble the raw (pre-XOR) frame.
pub fn build_frame(
    content: &str,
    a1: &str,
    app_id: &str,
    timestamp_millis: u64,
    nonce: &FrameNonce,
) -> [u8; FRAME_LEN] {
    let seed_byte = nonce.seed_byte();
    let offset_millis = u64::from(nonce.time_offset_secs) * 1000;
    let digest = md5::compute(content.as_bytes());

    let mut w = FrameWriter::new();
    w.put(&VERSION_BYTES);
    w.put_u32(nonce.seed);
    w.put(&encrypted_timestamp(timestamp_millis));
    w.put(&timestamp_millis.saturating_sub(offset_millis).to_le_bytes());
    w.put_u32(u32::from(nonce.sequence));
    w.put_u32(u32::from(nonce.window_props_len));
    w.put_u32(content.len() as u32);
    for byte in &digest.0[..8] {
        w.put_u8(byte ^ seed_byte);
    }
    w.put_fixed(a1.as_bytes(), A1_LEN);
    w.put_fixed(app_id.as_bytes(), APP_ID_LEN);
    w.put_u8(1);
    w.put_u8(CHECKSUM_VERSION);
    w.put_u8(seed_byte ^ CHECKSUM_XOR);
    w.put(&FIXED_TAIL);
    w.finish()
}

/// XOR `frame` with [`FRAME_XOR_KEY`].
///
/// Bytes past the key length pass through unchanged.
pub fn xor_frame(frame: &[u8]) -> Vec<u8> {
    frame
        .iter()
        .enumerate()
        .map(|(i, b)| match FRAME_XOR_KEY.get(i) {
            Some(k) => b ^ k,
            None => *b,
        })
        .collect()
}

/// XOR and encode a frame with the frame alphabet.
pub fn encode_frame(frame: &[u8; FRAME_LEN]) -> String {
    let masked = xor_frame(frame);
    FRAME_ALPHABET.encode(&masked[..FRAME_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const A1: &str = "19a0f4c1b2e3d4c5b6a7980123456789abcdef0123456789abcdef01";
    const CONTENT: &str = r#"/api/sns/web/v1/homefeed{"num":30,"refresh_type":1}"#;

    fn nonce() -> FrameNonce {
        FrameNonce {
            seed: 123_456_789,
            time_offset_secs: 42,
            sequence: 17,
            window_props_len: 200,
        }
    }

    #[test]
    fn test_golden_frame() {
        let frame = build_frame(CONTENT, A1, "xhs-pc-web", 1_736_870_400_123, &nonce());
        assert_eq!(
            hex::encode(frame),
            "01000015cd5b0797128967960302026b6c8a659401000011000000c80000003300000025394b0cc4\
             29db8334313961306634633162326533643463356236613739383031323334353637383961626364\
             656630313233343536373839616263640a7868732d70632d776562010166f9416767c9b583635e07\
             44fa8415"
        );
    }

    #[test]
    fn test_golden_encoded_frame() {
        let frame = build_frame(CONTENT, A1, "xhs-pc-web", 1_736_870_400_123, &nonce());
        assert_eq!(
            encode_frame(&frame),
            "oPRgRQYyyyYuYN+HhtJki8cAnc1BRG5w1KjxIkBo2iHJ7I4bdAoZxKw3fmKtPY5eJjHXmdWJg0vXIt+A\
             FjRgolXWgHi6wfJ0VRHHd8Rj2A6Pd0bKTc7/1PMNxSkjdjeMIbyf7BlCShdv+Sl2lBFKSndVZlciE0JR\
             Ik0OHF=="
        );
    }

    #[test]
    fn test_a1_truncated_to_52() {
        let long = "x".repeat(60);
        let frame = build_frame("/p", &long, "xhs-pc-web", 0, &nonce());
        assert_eq!(frame[offsets::A1_LEN_BYTE], 52);
        assert_eq!(&frame[offsets::A1..offsets::A1 + A1_LEN], "x".repeat(52).as_bytes());
        assert_eq!(frame[offsets::APP_ID_LEN_BYTE], 10);
    }

    #[test]
    fn test_a1_zero_padded_to_52() {
        let frame = build_frame("/p", "0123456789", "xhs-pc-web", 0, &nonce());
        let a1 = &frame[offsets::A1..offsets::A1 + A1_LEN];
        assert_eq!(&a1[..10], b"0123456789");
        assert!(a1[10..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_app_id_truncated_and_padded() {
        let frame = build_frame("/p", "a1", "xhs-pc-web-extra", 0, &nonce());
        assert_eq!(&frame[offsets::APP_ID..offsets::APP_ID + APP_ID_LEN], b"xhs-pc-web");

        let frame = build_frame("/p", "a1", "web", 0, &nonce());
        assert_eq!(&frame[offsets::APP_ID..offsets::APP_ID + 3], b"web");
        assert!(frame[offsets::APP_ID + 3..offsets::TAIL_START].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_seed_byte_keys_md5_and_checksum() {
        let n = nonce();
        let frame = build_frame(CONTENT, A1, "xhs-pc-web", 0, &n);
        let seed_byte = (n.seed & 0xff) as u8;
        let digest = md5::compute(CONTENT.as_bytes());
        for i in 0..8 {
            assert_eq!(frame[offsets::MD5 + i], digest.0[i] ^ seed_byte);
        }
        assert_eq!(frame[offsets::CHECKSUM_XOR], seed_byte ^ CHECKSUM_XOR);
        assert_eq!(&frame[offsets::FIXED_TAIL..], &FIXED_TAIL);
    }

    #[test]
    fn test_timestamp_segments() {
        let ts = 1_700_000_000_000u64;
        let n = FrameNonce {
            seed: 0,
            time_offset_secs: 5,
            sequence: 0,
            window_props_len: 255,
        };
        let frame = build_frame("/p", "a1", "xhs-pc-web", ts, &n);

        let mut b = [0u8; 8];
        b.copy_from_slice(&frame[offsets::TIMESTAMP_B..offsets::TIMESTAMP_B + 8]);
        assert_eq!(u64::from_le_bytes(b), ts - 5000);

        let mut a = [0u8; 8];
        a.copy_from_slice(&frame[offsets::TIMESTAMP_A..offsets::TIMESTAMP_A + 8]);
        let plain: Vec<u8> = a.iter().map(|x| x ^ TIMESTAMP_XOR).collect();
        let expected = ts.to_le_bytes();
        assert_eq!(&plain[1..], &expected[1..]);
        let mark = expected[1..].iter().fold(0u8, |acc, x| acc.wrapping_add(*x));
        assert_eq!(plain[0], mark);

        assert_eq!(&frame[offsets::WINDOW_PROPS..offsets::WINDOW_PROPS + 4], &[255, 0, 0, 0]);
    }

    #[test]
    fn test_content_length_is_bytes() {
        let frame = build_frame("/p中", "a1", "xhs-pc-web", 0, &nonce());
        assert_eq!(&frame[offsets::CONTENT_LEN..offsets::CONTENT_LEN + 4], &[5, 0, 0, 0]);
    }

    #[test]
    fn test_xor_passes_through_past_key() {
        let data = vec![0u8; FRAME_LEN + 3];
        let masked = xor_frame(&data);
        assert_eq!(&masked[..FRAME_LEN], &FRAME_XOR_KEY);
        assert_eq!(&masked[FRAME_LEN..], &[0, 0, 0]);
    }

    #[test]
    fn test_nonce_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let n = FrameNonce::generate(&mut rng);
            assert!(n.seed < (1 << 31) - 1);
            assert!(n.time_offset_secs >= 5);
        }
    }

    proptest! {
        #[test]
        fn test_frame_always_124_bytes(
            content in ".{0,300}",
            a1 in ".{0,80}",
            app_id in ".{0,20}",
            ts in 0u64..=4_000_000_000_000,
            seed in 0u32..0x7fff_ffff,
        ) {
            let n = FrameNonce { seed, time_offset_secs: 5, sequence: 1, window_props_len: 2 };
            let frame = build_frame(&content, &a1, &app_id, ts, &n);
            prop_assert_eq!(frame.len(), FRAME_LEN);
            prop_assert_eq!(frame[offsets::A1_LEN_BYTE], A1_LEN as u8);
            prop_assert_eq!(encode_frame(&frame).len(), 168);
        }
    }
}
