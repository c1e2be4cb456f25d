//! Dictionary page decoding for dictionary-encoded INT32 pages.
//!
//! The dictionary page is decoded once per column chunk into an
//! [`Int32Dictionary`], which every data page decoder of the chunk borrows.

use std::mem::size_of;

use log::debug;

use crate::parquet::error::{fmt_err, ParquetErrorExt, ParquetResult};
use crate::parquet_read::decoders::{Int32Decoder, PlainInt32Decoder};
use crate::parquet_read::page::DictPage;

pub trait PrimitiveDictDecoder<T> {
    /// Decodes value at `index`. Caller guarantees index is in bounds.
    fn get_dict_value(&self, index: u32) -> T;

    /// Number of values in this dictionary.
    fn len(&self) -> u32;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Materialized INT32 dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Int32Dictionary {
    values: Vec<i32>,
}

impl PrimitiveDictDecoder<i32> for Int32Dictionary {
    #[inline]
    fn get_dict_value(&self, index: u32) -> i32 {
        self.values[index as usize]
    }

    #[inline]
    fn len(&self) -> u32 {
        self.values.len() as u32
    }
}

impl Int32Dictionary {
    /// Decodes a `PLAIN` encoded dictionary page.
    pub fn try_new(dict_page: &DictPage<'_>) -> ParquetResult<Self> {
        if size_of::<i32>() * dict_page.num_values != dict_page.buffer.len() {
            return Err(fmt_err!(
                CorruptData,
                "dictionary page of {} bytes does not hold {} INT32 values",
                dict_page.buffer.len(),
                dict_page.num_values
            ));
        }

        let mut values = vec![0i32; dict_page.num_values];
        if !values.is_empty() {
            let mut decoder = PlainInt32Decoder::try_new(dict_page.buffer, dict_page.num_values)?;
            let decoded = decoder
                .decode_i32(&mut values)
                .context("could not decode dictionary page")?;
            if decoded != values.len() {
                return Err(fmt_err!(
                    CorruptData,
                    "dictionary page yielded {decoded} of {} values",
                    values.len()
                ));
            }
        }

        debug!(
            "decoded INT32 dictionary of {} values (sorted: {})",
            values.len(),
            dict_page.is_sorted
        );
        Ok(Self { values })
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }
}

impl From<Vec<i32>> for Int32Dictionary {
    fn from(values: Vec<i32>) -> Self {
        Self { values }
    }
}
