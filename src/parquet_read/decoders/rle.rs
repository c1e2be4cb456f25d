//! Hybrid RLE / bit-packed dictionary index decoding.
//!
//! `DictIndexDecoder` walks the runs of a dictionary data page and switches
//! between the iterator shapes of `RleIterator` at run boundaries.

use parquet2::encoding::bitpacked;
use parquet2::encoding::hybrid_rle::{Decoder as HybridRunDecoder, HybridEncoded as HybridRun};

use crate::parquet::error::{fmt_err, ParquetError, ParquetResult};

/// Repeats one value a fixed number of times.
pub struct RepeatN {
    pub value: u32,
    pub remaining: usize,
}

impl RepeatN {
    #[inline]
    pub fn new(value: u32, count: usize) -> Self {
        Self { value, remaining: count }
    }

    #[inline]
    pub fn next(&mut self) -> Option<u32> {
        if self.remaining > 0 {
            self.remaining -= 1;
            Some(self.value)
        } else {
            None
        }
    }
}

type BitpackedIterator<'a> = bitpacked::Decoder<'a, u32>;

pub enum RleIterator<'a> {
    Bitpacked(BitpackedIterator<'a>),
    Rle(RepeatN),
    /// Fast path for 8-bit bitpacked data: each byte is a dict index.
    ByteIndices {
        data: &'a [u8],
        pos: usize,
    },
}

impl RleIterator<'_> {
    #[inline(always)]
    pub fn next(&mut self) -> Option<u32> {
        match self {
            RleIterator::Bitpacked(iter) => iter.next(),
            RleIterator::Rle(iter) => iter.next(),
            RleIterator::ByteIndices { data, pos } => {
                let val = *data.get(*pos)?;
                *pos += 1;
                Some(val as u32)
            }
        }
    }
}

/// Decoder of the index stream of a dictionary-encoded data page.
///
/// The page body is one byte holding the index bit width followed by the
/// hybrid RLE / bit-packed runs. A bit width of zero means every index is 0.
pub struct DictIndexDecoder<'a> {
    runs: Option<HybridRunDecoder<'a>>,
    num_bits: usize,
    run: RleIterator<'a>,
    remaining: usize,
    error: Option<ParquetError>,
}

impl<'a> DictIndexDecoder<'a> {
    pub fn try_new(buffer: &'a [u8], num_values: usize) -> ParquetResult<Self> {
        let Some((&num_bits, indices)) = buffer.split_first() else {
            if num_values > 0 {
                return Err(fmt_err!(
                    InsufficientData,
                    "dictionary index page is empty, expected {num_values} indices"
                ));
            }
            return Ok(Self::repeat_zero(0));
        };

        let num_bits = num_bits as usize;
        if num_bits > 32 {
            return Err(fmt_err!(
                CorruptData,
                "dictionary index bit width {num_bits} exceeds 32"
            ));
        }
        if num_bits == 0 {
            return Ok(Self::repeat_zero(num_values));
        }

        Ok(Self {
            runs: Some(HybridRunDecoder::new(indices, num_bits)),
            num_bits,
            run: RleIterator::Rle(RepeatN::new(0, 0)),
            remaining: num_values,
            error: None,
        })
    }

    fn repeat_zero(num_values: usize) -> Self {
        Self {
            runs: None,
            num_bits: 0,
            run: RleIterator::Rle(RepeatN::new(0, num_values)),
            remaining: num_values,
            error: None,
        }
    }

    /// Number of indices not decoded yet.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Fills `keys` with the next indices and returns how many were written.
    ///
    /// Errors are sticky: once the stream fails, every later call reports it.
    pub fn decode_keys(&mut self, keys: &mut [u32]) -> ParquetResult<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.remaining == 0 {
            return Err(fmt_err!(NoMoreData, "all dictionary indices decoded"));
        }

        let wanted = keys.len().min(self.remaining);
        let mut n = 0;
        while n < wanted {
            if let Some(key) = self.run.next() {
                keys[n] = key;
                n += 1;
                continue;
            }
            if let Err(err) = self.next_run() {
                self.error = Some(err.clone());
                if n == 0 {
                    return Err(err);
                }
                break;
            }
        }
        self.remaining -= n;
        Ok(n)
    }

    fn next_run(&mut self) -> ParquetResult<()> {
        let remaining = self.remaining;
        let Some(run) = self.runs.as_mut().and_then(|runs| runs.next()) else {
            return Err(fmt_err!(
                InsufficientData,
                "dictionary index stream ended with {remaining} indices outstanding"
            ));
        };

        match run? {
            HybridRun::Bitpacked(values) => {
                if self.num_bits == 8 {
                    // Each byte is a dict index, skip the unpack step.
                    self.run = RleIterator::ByteIndices { data: values, pos: 0 };
                } else {
                    let count = values.len() * 8 / self.num_bits;
                    let inner = bitpacked::Decoder::<u32>::try_new(values, self.num_bits, count)?;
                    self.run = RleIterator::Bitpacked(inner);
                }
            }
            HybridRun::Rle(pack, repeat) => {
                let mut bytes = [0u8; std::mem::size_of::<u32>()];
                pack.iter().zip(bytes.iter_mut()).for_each(|(src, dst)| {
                    *dst = *src;
                });
                self.run = RleIterator::Rle(RepeatN::new(u32::from_le_bytes(bytes), repeat));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parquet::error::ParquetErrorCause;
    use crate::parquet_read::decoders::DictIndexDecoder;

    fn encode_rle_data(values: &[u32], num_bits: u8) -> Vec<u8> {
        let mut buffer = vec![num_bits];
        parquet2::encoding::hybrid_rle::encode_u32(
            &mut buffer,
            values.iter().copied(),
            num_bits as u32,
        )
        .unwrap();
        buffer
    }

    fn decode_all(decoder: &mut DictIndexDecoder, capacity: usize) -> Vec<u32> {
        let mut keys = vec![0u32; capacity];
        let mut result = Vec::new();
        loop {
            match decoder.decode_keys(&mut keys) {
                Ok(n) => result.extend_from_slice(&keys[..n]),
                Err(err) => {
                    assert!(err.is_no_more_data(), "{err}");
                    return result;
                }
            }
        }
    }

    #[test]
    fn test_bitpacked_indices() {
        let indices = [2, 0, 1, 1];
        let encoded = encode_rle_data(&indices, 2);
        let mut decoder = DictIndexDecoder::try_new(&encoded, 4).unwrap();
        assert_eq!(decode_all(&mut decoder, 3), indices);
    }

    #[test]
    fn test_byte_indices() {
        let indices: Vec<u32> = (0..200).map(|i| (i * 7) % 251).collect();
        let encoded = encode_rle_data(&indices, 8);
        let mut decoder = DictIndexDecoder::try_new(&encoded, indices.len()).unwrap();
        assert_eq!(decode_all(&mut decoder, 64), indices);
    }

    #[test]
    fn test_rle_runs_stop_at_declared_count() {
        // bit width 3, then two RLE runs: 100 x 5, 100 x 3
        let encoded = [3u8, 0xC8, 0x01, 5, 0xC8, 0x01, 3];
        let expected: Vec<u32> = std::iter::repeat(5)
            .take(100)
            .chain(std::iter::repeat(3).take(50))
            .collect();
        let mut decoder = DictIndexDecoder::try_new(&encoded, 150).unwrap();
        assert_eq!(decode_all(&mut decoder, 1000), expected);
        assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn test_mixed_runs() {
        // bit width 2: RLE 3 x 1, then one bit-packed group [0, 1, 2, 3, 0, 1, 2, 3]
        let encoded = [2u8, 0x06, 1, 0x03, 0b11100100, 0b11100100];
        let mut decoder = DictIndexDecoder::try_new(&encoded, 11).unwrap();
        assert_eq!(
            decode_all(&mut decoder, 4),
            vec![1, 1, 1, 0, 1, 2, 3, 0, 1, 2, 3]
        );
    }

    #[test]
    fn test_zero_bit_width() {
        let mut decoder = DictIndexDecoder::try_new(&[0], 5).unwrap();
        assert_eq!(decode_all(&mut decoder, 2), vec![0; 5]);
    }

    #[test]
    fn test_empty_page() {
        let err = DictIndexDecoder::try_new(&[], 3).err().unwrap();
        assert_eq!(err.cause(), ParquetErrorCause::InsufficientData);

        let mut decoder = DictIndexDecoder::try_new(&[], 0).unwrap();
        assert!(decoder.decode_keys(&mut [0; 4]).unwrap_err().is_no_more_data());
    }

    #[test]
    fn test_bit_width_too_large() {
        let err = DictIndexDecoder::try_new(&[33, 0, 0], 1).err().unwrap();
        assert_eq!(err.cause(), ParquetErrorCause::CorruptData);
    }

    #[test]
    fn test_stream_shorter_than_count() {
        let encoded = encode_rle_data(&[1, 2, 3, 1, 2, 3, 1, 2], 2);
        let mut decoder = DictIndexDecoder::try_new(&encoded, 20).unwrap();
        let mut keys = [0u32; 32];

        assert_eq!(decoder.decode_keys(&mut keys).unwrap(), 8);
        assert_eq!(&keys[..8], &[1, 2, 3, 1, 2, 3, 1, 2]);
        let err = decoder.decode_keys(&mut keys).unwrap_err();
        assert_eq!(err.cause(), ParquetErrorCause::InsufficientData);
        // Sticky.
        let err = decoder.decode_keys(&mut keys).unwrap_err();
        assert_eq!(err.cause(), ParquetErrorCause::InsufficientData);
    }
}
