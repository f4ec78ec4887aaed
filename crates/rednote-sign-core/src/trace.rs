//! Trace identifiers sent alongside every signed request.

use rand::Rng;

const HEX_CHARS: &[u8] = b"abcdef0123456789";
const BASE36_DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Bits reserved for the random sequence in the xray trace id.
const XRAY_SEQ_BITS: u32 = 23;

/// Largest random term added to a search id.
const SEARCH_ID_MAX_RANDOM: u64 = (1 << 31) - 2;

/// 16 random lowercase hex characters (`x-b3-traceid`).
pub fn trace_id_16_hex<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..16)
        .map(|_| HEX_CHARS[rng.gen_range(0..HEX_CHARS.len())] as char)
        .collect()
}

/// 32 hex characters (`x-xray-traceid`).
///
/// The high half is `(timestamp << 23) | seq` with a random 23-bit `seq`; the
/// low half is a fresh b3-style id.
///
/// The high half is kept to 64 bits so the id is always 32 characters. From
/// 2^41 ms (late 2039) on, the timestamp's top bits fall off.
pub fn xray_trace_id<R: Rng + ?Sized>(rng: &mut R, timestamp_millis: u64) -> String {
    let seq: u64 = rng.gen_range(0..(1u64 << XRAY_SEQ_BITS));
    let shifted = u128::from(timestamp_millis) << XRAY_SEQ_BITS;
    let high = (shifted as u64) | seq;
    format!("{high:016x}{}", trace_id_16_hex(rng))
}

/// Search session id: base36 of `(timestamp << 64) + random`.
pub fn search_id<R: Rng + ?Sized>(rng: &mut R, timestamp_millis: u64) -> String {
    let random = rng.gen_range(0..=SEARCH_ID_MAX_RANDOM);
    base36_unsigned((u128::from(timestamp_millis) << 64) + u128::from(random))
}

/// Base36 with lowercase digits and a leading `-` for negative input.
pub fn base36_encode(number: i128) -> String {
    let digits = base36_unsigned(number.unsigned_abs());
    if number < 0 {
        format!("-{digits}")
    } else {
        digits
    }
}

fn base36_unsigned(mut number: u128) -> String {
    if number == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while number > 0 {
        out.push(BASE36_DIGITS[(number % 36) as usize]);
        number /= 36;
    }
    out.reverse();
    // digits are ASCII
    out.into_iter().map(char::from).collect()
}
