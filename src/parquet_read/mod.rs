pub mod decode;
pub mod decoders;
pub mod output;
pub mod page;

pub use decode::Int32PageDecoder;
pub use output::{Output, Value};
pub use page::{DataPage, DictPage};

/// Decoder settings that tolerate non-conforming writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Rejects `DELTA_BINARY_PACKED` pages whose block size is not a multiple
    /// of the miniblock count. When off, the miniblock size is rounded down.
    pub strict_block_layout: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { strict_block_layout: true }
    }
}
