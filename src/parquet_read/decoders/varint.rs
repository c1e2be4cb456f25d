//! ULEB128 and zig-zag varint readers.
//!
//! Both return `(value, bytes_consumed)`, or `None` when the input is empty,
//! ends in the middle of a varint, or encodes more than 64 bits.

/// Longest ULEB128 encoding of a `u64`.
const MAX_VARINT_LEN: usize = 10;

#[inline]
pub fn decode_uleb128(data: &[u8]) -> Option<(u64, usize)> {
    let mut result = 0u64;
    for (i, byte) in data.iter().take(MAX_VARINT_LEN).enumerate() {
        let shift = 7 * i as u32;
        let bits = u64::from(byte & 0x7F);
        if shift == 63 && bits > 1 {
            return None;
        }
        result |= bits << shift;
        if byte & 0x80 == 0 {
            return Some((result, i + 1));
        }
    }
    None
}

#[inline]
pub fn decode_zigzag(data: &[u8]) -> Option<(i64, usize)> {
    let (u, consumed) = decode_uleb128(data)?;
    Some(((u >> 1) as i64 ^ -((u & 1) as i64), consumed))
}
