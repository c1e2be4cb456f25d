use log::debug;
use parquet2::encoding::Encoding;

use crate::parquet::error::{fmt_err, ParquetResult};
use crate::parquet_read::decoders::{
    DeltaBinaryPackedInt32Decoder, DictionaryInt32Decoder, Int32Decoder, Int32Dictionary,
    PlainInt32Decoder,
};
use crate::parquet_read::page::DataPage;
use crate::parquet_read::DecodeOptions;

/// Decodes the values of one INT32 data page with the decoder its encoding calls for.
pub enum Int32PageDecoder<'a> {
    Plain(PlainInt32Decoder<'a>),
    Dictionary(DictionaryInt32Decoder<'a, Int32Dictionary>),
    DeltaBinaryPacked(DeltaBinaryPackedInt32Decoder<'a>),
}

impl<'a> Int32PageDecoder<'a> {
    pub fn try_new(page: &DataPage<'a>, dict: Option<&'a Int32Dictionary>) -> ParquetResult<Self> {
        Self::try_new_with_options(page, dict, &DecodeOptions::default())
    }

    pub fn try_new_with_options(
        page: &DataPage<'a>,
        dict: Option<&'a Int32Dictionary>,
        options: &DecodeOptions,
    ) -> ParquetResult<Self> {
        let encoding = page.encoding();
        debug!(
            "int32: decoding {:?} page, {} values, {} bytes",
            encoding,
            page.num_values(),
            page.buffer.len()
        );
        let decoder = match (encoding, dict) {
            (Encoding::Plain, _) => {
                Self::Plain(PlainInt32Decoder::try_new(page.buffer, page.num_values())?)
            }
            (Encoding::PlainDictionary | Encoding::RleDictionary, Some(dict)) => Self::Dictionary(
                DictionaryInt32Decoder::try_new(page.buffer, page.num_values(), dict)?,
            ),
            (Encoding::PlainDictionary | Encoding::RleDictionary, None) => {
                return Err(fmt_err!(
                    CorruptData,
                    "int32: {encoding:?} page without a dictionary page"
                ));
            }
            (Encoding::DeltaBinaryPacked, _) => {
                Self::DeltaBinaryPacked(DeltaBinaryPackedInt32Decoder::try_new_with_options(
                    page.buffer,
                    page.num_values(),
                    options,
                )?)
            }
            (encoding, _) => {
                return Err(fmt_err!(Unsupported, "int32: {encoding:?} encoding is not supported"));
            }
        };
        Ok(decoder)
    }

    /// Decodes every value of the page.
    pub fn decode_to_vec(&mut self) -> ParquetResult<Vec<i32>> {
        let mut values = Vec::new();
        let mut buf = [0i32; 1024];
        loop {
            match self.decode_i32(&mut buf) {
                Ok(n) => values.extend_from_slice(&buf[..n]),
                Err(err) if err.is_no_more_data() => return Ok(values),
                Err(mut err) => {
                    err.add_context(format!("after {} values", values.len()));
                    return Err(err);
                }
            }
        }
    }
}

impl Int32Decoder for Int32PageDecoder<'_> {
    fn decode_i32(&mut self, out: &mut [i32]) -> ParquetResult<usize> {
        match self {
            Self::Plain(decoder) => decoder.decode_i32(out),
            Self::Dictionary(decoder) => decoder.decode_i32(out),
            Self::DeltaBinaryPacked(decoder) => decoder.decode_i32(out),
        }
    }

    fn skip(&mut self, count: usize) -> ParquetResult<usize> {
        match self {
            Self::Plain(decoder) => decoder.skip(count),
            Self::Dictionary(decoder) => decoder.skip(count),
            Self::DeltaBinaryPacked(decoder) => decoder.skip(count),
        }
    }
}
