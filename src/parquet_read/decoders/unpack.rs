//! Unpacking of 8 values bit-packed LSB-first at a fixed width.
//!
//! Eight values at `w` bits occupy exactly `w` bytes, so each group of a
//! `DELTA_BINARY_PACKED` mini-block is unpacked by one call.

/// Unpacks a group of 8 values packed at `W` bits from the first `W` bytes of
/// `packed`. Missing bytes read as zero.
pub fn unpack8<const W: usize>(packed: &[u8]) -> [u32; 8] {
    let mut out = [0u32; 8];
    if W == 0 {
        return out;
    }

    let mask = (1u64 << W) - 1;
    let mut bytes = packed.iter().take(W);
    let mut buffer = 0u64;
    let mut bits = 0usize;
    for slot in out.iter_mut() {
        while bits < W {
            buffer |= u64::from(bytes.next().copied().unwrap_or(0)) << bits;
            bits += 8;
        }
        *slot = (buffer & mask) as u32;
        buffer >>= W;
        bits -= W;
    }
    out
}

pub type Unpack8Fn = fn(&[u8]) -> [u32; 8];

macro_rules! unpack8_table {
    ($($w:literal)*) => {
        [$(unpack8::<$w>),*]
    };
}

/// `UNPACK8_BY_WIDTH[w]` unpacks 8 values of `w` bits, for `w` in `0..=32`.
pub const UNPACK8_BY_WIDTH: [Unpack8Fn; 33] = unpack8_table!(
    0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16
    17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32
);

#[cfg(test)]
mod tests {
    use super::*;

    fn pack8(values: &[u32; 8], width: usize) -> Vec<u8> {
        let mut out = vec![0u8; width];
        for (i, &v) in values.iter().enumerate() {
            for bit in 0..width {
                if (v >> bit) & 1 == 1 {
                    let pos = i * width + bit;
                    out[pos / 8] |= 1 << (pos % 8);
                }
            }
        }
        out
    }

    #[test]
    fn test_unpack_3_bits() {
        // 0..8 at 3 bits
        let data = [0b10001000u8, 0b11000110, 0b11111010];
        assert_eq!(UNPACK8_BY_WIDTH[3](&data), [0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_unpack_zero_width() {
        assert_eq!(UNPACK8_BY_WIDTH[0](&[]), [0; 8]);
    }

    #[test]
    fn test_unpack_every_width() {
        for width in 1..=32usize {
            let max = if width == 32 { u32::MAX } else { (1u32 << width) - 1 };
            let values = [0, max, 1, max / 2, max / 3, 7 & max, max - 1, max / 5];
            let packed = pack8(&values, width);
            assert_eq!(packed.len(), width);
            assert_eq!(UNPACK8_BY_WIDTH[width](&packed), values, "width {width}");
        }
    }

    #[test]
    fn test_unpack_ignores_bytes_after_group() {
        let data = [0xFFu8, 0xFF];
        assert_eq!(UNPACK8_BY_WIDTH[1](&data), [1; 8]);
    }
}
