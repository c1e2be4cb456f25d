//! Decoder for dictionary-encoded INT32 pages (`PLAIN_DICTIONARY`, `RLE_DICTIONARY`).
//!
//! Indices come from `DictIndexDecoder` and are resolved through a dictionary
//! lookup; the decoder itself only maps keys to values.

use crate::parquet::error::{fmt_err, ParquetError, ParquetResult};
use crate::parquet_read::decoders::{DictIndexDecoder, Int32Decoder, PrimitiveDictDecoder};

pub struct DictionaryInt32Decoder<'a, D: PrimitiveDictDecoder<i32>> {
    dict: &'a D,
    keys: DictIndexDecoder<'a>,
    key_buf: Vec<u32>,
    error: Option<ParquetError>,
}

impl<'a, D: PrimitiveDictDecoder<i32>> DictionaryInt32Decoder<'a, D> {
    /// Creates a decoder over the index stream of one data page.
    pub fn try_new(buffer: &'a [u8], num_values: usize, dict: &'a D) -> ParquetResult<Self> {
        Ok(Self {
            dict,
            keys: DictIndexDecoder::try_new(buffer, num_values)?,
            key_buf: Vec::new(),
            error: None,
        })
    }
}

impl<D: PrimitiveDictDecoder<i32>> Int32Decoder for DictionaryInt32Decoder<'_, D> {
    fn decode_i32(&mut self, out: &mut [i32]) -> ParquetResult<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        self.key_buf.resize(out.len(), 0);
        let count = self.keys.decode_keys(&mut self.key_buf)?;

        let dict_len = self.dict.len();
        for (i, (dst, &key)) in out.iter_mut().zip(&self.key_buf[..count]).enumerate() {
            if key >= dict_len {
                let err = fmt_err!(
                    CorruptData,
                    "index {key} is out of dict bounds {dict_len}"
                );
                self.error = Some(err.clone());
                return if i == 0 { Err(err) } else { Ok(i) };
            }
            *dst = self.dict.get_dict_value(key);
        }
        Ok(count)
    }
}
