//! Decoder for Parquet `DELTA_BINARY_PACKED` encoded INT32 data.
//!
//! ```text
//! page      := <block size> <miniblocks per block> <total value count> <first value> <block>*
//! block     := <min delta> <bit width of each miniblock> <miniblock>*
//! ```
//!
//! Sizes and the count are ULEB128 varints, the first value and min delta are
//! zig-zag varints and each bit width is one byte. A miniblock holds its
//! deltas minus the block's min delta, bit-packed at the miniblock's width.
//! The decoder walks this structure lazily, eight deltas at a time, so that
//! `decode` can resume after any output capacity.

use log::{debug, trace};

use crate::parquet::error::{fmt_err, ParquetResult};
use crate::parquet_read::decoders::{decode_uleb128, decode_zigzag, Int32Decoder, UNPACK8_BY_WIDTH};
use crate::parquet_read::DecodeOptions;

/// Values unpacked by one call of the unpack table.
const GROUP_SIZE: usize = 8;

pub struct DeltaBinaryPackedInt32Decoder<'a> {
    data: &'a [u8],
    pos: usize,

    num_mini_blocks: usize,
    mini_block_size: usize,
    total_count: usize,

    // The value returned next.
    value: i32,
    min_delta: i32,
    mini_block_widths: &'a [u8],
    // Next miniblock of the current block to open; `num_mini_blocks` once the
    // block is used up.
    mini_block: usize,
    mini_block_width: usize,
    // Bytes consumed so far from the open miniblock.
    mini_block_consumed: usize,
    deltas: [u32; GROUP_SIZE],
    emitted: usize,
    blocks_read: usize,
}

impl<'a> DeltaBinaryPackedInt32Decoder<'a> {
    pub fn try_new(data: &'a [u8], num_values: usize) -> ParquetResult<Self> {
        Self::try_new_with_options(data, num_values, &DecodeOptions::default())
    }

    /// Reads the page header. The value count stored in the header is
    /// authoritative; `num_values` may be larger when the page also counts nulls.
    pub fn try_new_with_options(
        data: &'a [u8],
        num_values: usize,
        options: &DecodeOptions,
    ) -> ParquetResult<Self> {
        let mut pos = 0;
        let mut read_varint = |field: &str| -> ParquetResult<u64> {
            let (value, n) = decode_uleb128(&data[pos..])
                .ok_or_else(|| fmt_err!(CorruptData, "int32/delta: failed to read {field}"))?;
            pos += n;
            Ok(value)
        };

        let block_size = read_varint("block size")?;
        let num_mini_blocks = read_varint("number of mini blocks")?;
        let total_count = read_varint("total value count")?;

        let (first_value, n) = decode_zigzag(&data[pos..])
            .ok_or_else(|| fmt_err!(CorruptData, "int32/delta: failed to read first value"))?;
        pos += n;

        if block_size == 0 || num_mini_blocks == 0 || block_size > i32::MAX as u64 {
            return Err(fmt_err!(
                CorruptData,
                "int32/delta: invalid block layout: block size {block_size}, {num_mini_blocks} mini blocks"
            ));
        }
        if options.strict_block_layout && block_size % num_mini_blocks != 0 {
            return Err(fmt_err!(
                CorruptData,
                "int32/delta: block size {block_size} is not divisible into {num_mini_blocks} mini blocks"
            ));
        }
        let mini_block_size = block_size / num_mini_blocks;
        if mini_block_size == 0 || mini_block_size % GROUP_SIZE as u64 != 0 {
            return Err(fmt_err!(
                CorruptData,
                "int32/delta: mini block size {mini_block_size} is not a positive multiple of {GROUP_SIZE}"
            ));
        }
        let first_value = i32::try_from(first_value).map_err(|_| {
            fmt_err!(CorruptData, "int32/delta: first value {first_value} is out of INT32 range")
        })?;
        let to_usize = |value: u64, field: &str| {
            usize::try_from(value)
                .map_err(|_| fmt_err!(CorruptData, "int32/delta: {field} {value} is too large"))
        };
        let num_mini_blocks = to_usize(num_mini_blocks, "number of mini blocks")?;
        let mini_block_size = to_usize(mini_block_size, "mini block size")?;
        let total_count = to_usize(total_count, "total value count")?;

        debug!(
            "int32/delta: page header block_size={block_size}, mini_blocks={num_mini_blocks}, \
             total_count={total_count}, first_value={first_value}, declared_count={num_values}"
        );

        Ok(Self {
            data,
            pos,
            num_mini_blocks,
            mini_block_size,
            total_count,
            value: first_value,
            min_delta: 0,
            mini_block_widths: &[],
            mini_block: num_mini_blocks,
            mini_block_width: 0,
            mini_block_consumed: 0,
            deltas: [0; GROUP_SIZE],
            emitted: 0,
            blocks_read: 0,
        })
    }

    /// Number of values stored in the page.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Number of values not produced yet.
    pub fn remaining(&self) -> usize {
        self.total_count - self.emitted
    }

    /// Bytes of the page consumed so far. Once every value has been decoded
    /// this is the encoded length of the page.
    pub fn consumed_bytes(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }

    fn read_block_header(&mut self) -> ParquetResult<()> {
        let block = self.blocks_read;
        let (min_delta, n) = decode_zigzag(self.rest()).ok_or_else(|| {
            fmt_err!(CorruptData, "int32/delta: failed to read min delta of block {block}")
        })?;

        let start = self.pos + n;
        let Some(widths) = self.data.get(start..start + self.num_mini_blocks) else {
            return Err(fmt_err!(
                CorruptData,
                "int32/delta: failed to read all bitwidths of miniblocks of block {block}"
            ));
        };

        // Writers may compute deltas in 64 bits; modulo 2^32 they are exact.
        self.min_delta = min_delta as i32;
        self.mini_block_widths = widths;
        self.mini_block = 0;
        self.pos = start + self.num_mini_blocks;
        self.blocks_read += 1;
        trace!("int32/delta: block {block} min_delta={min_delta}, bit widths {widths:?}");
        Ok(())
    }

    /// Unpacks the deltas of the group starting at the current value.
    /// Leaves the state untouched if the group cannot be read.
    fn load_group(&mut self) -> ParquetResult<()> {
        let index = self.emitted;
        let opening = index % self.mini_block_size == 0;
        if opening && self.mini_block >= self.num_mini_blocks {
            self.read_block_header()?;
        }

        let (width, consumed) = if opening {
            let width = self.mini_block_widths.get(self.mini_block).copied().ok_or_else(|| {
                fmt_err!(CorruptData, "int32/delta: missing bit width of miniblock {}", self.mini_block)
            })?;
            (width as usize, 0)
        } else {
            (self.mini_block_width, self.mini_block_consumed)
        };
        if width > 32 {
            return Err(fmt_err!(
                CorruptData,
                "int32/delta: bit width {width} of miniblock {} exceeds 32",
                self.mini_block
            ));
        }

        let Some(packed) = self.data.get(self.pos..self.pos + width) else {
            return Err(fmt_err!(
                InsufficientData,
                "int32/delta: not enough data for value {index}: need {width} bytes, {} left",
                self.data.len() - self.pos
            ));
        };
        let span = (self.mini_block_size / GROUP_SIZE)
            .checked_mul(width)
            .ok_or_else(|| {
                fmt_err!(
                    CorruptData,
                    "int32/delta: miniblock of {} values at bit width {width} overflows",
                    self.mini_block_size
                )
            })?;
        self.deltas = UNPACK8_BY_WIDTH[width](packed);

        if opening {
            self.mini_block += 1;
            self.mini_block_width = width;
        }
        self.pos += width;
        self.mini_block_consumed = consumed + width;

        // The last group needed: the miniblock is padded to its full size.
        if index + GROUP_SIZE >= self.total_count - 1 {
            let padding = span.saturating_sub(self.mini_block_consumed);
            self.pos = self.pos.saturating_add(padding).min(self.data.len());
            self.mini_block_consumed = span;
        }
        Ok(())
    }
}

impl Int32Decoder for DeltaBinaryPackedInt32Decoder<'_> {
    fn decode_i32(&mut self, out: &mut [i32]) -> ParquetResult<usize> {
        if out.is_empty() {
            return Ok(0);
        }

        let mut n = 0;
        while n < out.len() && self.emitted < self.total_count {
            // The last value needs no delta.
            if self.emitted % GROUP_SIZE == 0 && self.emitted + 1 < self.total_count {
                if let Err(err) = self.load_group() {
                    if n == 0 {
                        return Err(err);
                    }
                    break;
                }
            }

            out[n] = self.value;
            let delta = self.deltas[self.emitted % GROUP_SIZE] as i32;
            self.value = self.value.wrapping_add(delta).wrapping_add(self.min_delta);
            self.emitted += 1;
            n += 1;
        }

        if n == 0 {
            return Err(fmt_err!(
                NoMoreData,
                "int32/delta: all {} values decoded",
                self.total_count
            ));
        }
        Ok(n)
    }
}
