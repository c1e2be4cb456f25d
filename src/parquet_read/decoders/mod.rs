//! Encoding-specific INT32 decoders used by `parquet_read`.
//!
//! Every decoder implements [`Int32Decoder`]: construct it once per page, then
//! call `decode` until it reports `NoMoreData`.

use crate::parquet::error::{fmt_err, ParquetResult};
use crate::parquet_read::output::Output;

/// Physical-to-destination value converters shared by all decoders.
mod converters;
/// Delta-binary-packed decoder (`DELTA_BINARY_PACKED`).
mod delta_binary_packed;
/// Dictionary page reader and dictionary lookup abstraction.
mod dictionary;
/// Plain-encoded decoder (`PLAIN`).
mod plain;
/// Run iterators and the hybrid RLE dictionary index decoder.
mod rle;
/// Dictionary-encoded decoder (`PLAIN_DICTIONARY` / `RLE_DICTIONARY`).
mod rle_dictionary;
/// 8-value bit unpacking.
mod unpack;
/// LEB128 and zig-zag varint readers.
mod varint;

pub use converters::*;
pub use delta_binary_packed::DeltaBinaryPackedInt32Decoder;
pub use dictionary::{Int32Dictionary, PrimitiveDictDecoder};
pub use plain::PlainInt32Decoder;
pub use rle::{DictIndexDecoder, RepeatN, RleIterator};
pub use rle_dictionary::DictionaryInt32Decoder;
pub use unpack::{unpack8, UNPACK8_BY_WIDTH};
pub use varint::{decode_uleb128, decode_zigzag};

/// Scratch size used when converting or discarding values in batches.
const BATCH_SIZE: usize = 128;

/// Common interface of the INT32 page decoders.
///
/// A call that has written some values and then runs into an error returns
/// the count of values written; the failing unit is left unconsumed so the
/// next call reports the error.
pub trait Int32Decoder {
    /// Fills `out` from index 0 and returns the number of values written.
    fn decode_i32(&mut self, out: &mut [i32]) -> ParquetResult<usize>;

    /// Fills whichever destination the caller holds.
    fn decode(&mut self, output: Output<'_>) -> ParquetResult<usize> {
        match output {
            Output::Int32(buf) => self.decode_i32(buf),
            Output::Int64(buf) => decode_converted(self, buf, &Widen::<i64>::new()),
            Output::Double(buf) => decode_converted(self, buf, &Widen::<f64>::new()),
            Output::Values(buf) => decode_converted(self, buf, &ToValue),
            other => Err(fmt_err!(
                Unsupported,
                "INT32 values cannot be written to a {} output",
                other.kind()
            )),
        }
    }

    /// Decodes and discards up to `count` values, returning how many were skipped.
    fn skip(&mut self, count: usize) -> ParquetResult<usize> {
        let mut scratch = [0i32; BATCH_SIZE];
        let mut skipped = 0;
        while skipped < count {
            let batch = (count - skipped).min(BATCH_SIZE);
            let decoded = match self.decode_i32(&mut scratch[..batch]) {
                Ok(decoded) => decoded,
                Err(_) if skipped > 0 => break,
                Err(err) => return Err(err),
            };
            skipped += decoded;
            if decoded < batch {
                break;
            }
        }
        Ok(skipped)
    }
}

fn decode_converted<D, U, V>(decoder: &mut D, out: &mut [U], converter: &V) -> ParquetResult<usize>
where
    D: Int32Decoder + ?Sized,
    V: Converter<i32, U>,
{
    let mut scratch = [0i32; BATCH_SIZE];
    let mut filled = 0;
    while filled < out.len() {
        let batch = (out.len() - filled).min(BATCH_SIZE);
        let decoded = match decoder.decode_i32(&mut scratch[..batch]) {
            Ok(decoded) => decoded,
            Err(_) if filled > 0 => break,
            Err(err) => return Err(err),
        };
        for (dst, src) in out[filled..filled + decoded].iter_mut().zip(&scratch[..decoded]) {
            *dst = converter.convert(*src);
        }
        filled += decoded;
        if decoded < batch {
            break;
        }
    }
    Ok(filled)
}
