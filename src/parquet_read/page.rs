use parquet2::encoding::Encoding;

/// The values section of an uncompressed data page of a required INT32 column.
#[derive(Debug, Clone, Copy)]
pub struct DataPage<'a> {
    pub encoding: Encoding,
    pub buffer: &'a [u8],
    pub num_values: usize,
}

impl<'a> DataPage<'a> {
    pub fn new(encoding: Encoding, buffer: &'a [u8], num_values: usize) -> Self {
        Self { encoding, buffer, num_values }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn num_values(&self) -> usize {
        self.num_values
    }
}

/// An uncompressed, encoded dictionary page.
#[derive(Debug, Clone, Copy)]
pub struct DictPage<'a> {
    pub buffer: &'a [u8],
    pub num_values: usize,
    pub is_sorted: bool,
}
