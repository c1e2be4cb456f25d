//! Decoder for Parquet `PLAIN` encoded INT32 values.
//!
//! Values are 4-byte little-endian literals packed back to back.

use std::mem::size_of;

use crate::parquet::error::{fmt_err, ParquetResult};
use crate::parquet_read::decoders::Int32Decoder;

const VALUE_SIZE: usize = size_of::<i32>();

/// A decoder for INT32 values with plain encoding.
pub struct PlainInt32Decoder<'a> {
    values: &'a [u8],
    values_offset: usize,
    num_values: usize,
    decoded: usize,
}

impl<'a> PlainInt32Decoder<'a> {
    /// Creates a decoder over `values` that produces at most `num_values` values.
    pub fn try_new(values: &'a [u8], num_values: usize) -> ParquetResult<Self> {
        Ok(Self { values, values_offset: 0, num_values, decoded: 0 })
    }

    /// Number of declared values not produced yet.
    pub fn remaining(&self) -> usize {
        self.num_values - self.decoded
    }

    /// Claims up to `requested` whole values and returns the byte offset of the
    /// first one together with the claimed count.
    fn claim(&mut self, requested: usize) -> ParquetResult<(usize, usize)> {
        let wanted = requested.min(self.remaining());
        let trailing = self.values.len() - self.values_offset;
        let count = wanted.min(trailing / VALUE_SIZE);
        if count == 0 {
            return if wanted > 0 && trailing > 0 {
                Err(fmt_err!(
                    InsufficientData,
                    "int32/plain: {trailing} trailing bytes cannot hold value {}",
                    self.decoded
                ))
            } else {
                Err(fmt_err!(
                    NoMoreData,
                    "int32/plain: all {} values decoded",
                    self.decoded
                ))
            };
        }

        let start = self.values_offset;
        self.values_offset += count * VALUE_SIZE;
        self.decoded += count;
        Ok((start, count))
    }
}

impl Int32Decoder for PlainInt32Decoder<'_> {
    fn decode_i32(&mut self, out: &mut [i32]) -> ParquetResult<usize> {
        if out.is_empty() {
            return Ok(0);
        }

        let (start, count) = self.claim(out.len())?;
        let bytes = &self.values[start..start + count * VALUE_SIZE];
        for (dst, chunk) in out.iter_mut().zip(bytes.chunks_exact(VALUE_SIZE)) {
            *dst = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(count)
    }

    fn skip(&mut self, count: usize) -> ParquetResult<usize> {
        if count == 0 {
            return Ok(0);
        }
        let (_, skipped) = self.claim(count)?;
        Ok(skipped)
    }
}
