#![allow(dead_code)]

use std::{io::Cursor, sync::Arc};

use parquet::{
    basic::{Encoding as ParquetEncoding, Repetition, Type as PhysicalType},
    column::page::Page,
    data_type::Int32Type,
    file::{
        properties::{WriterProperties, WriterVersion},
        reader::{FileReader, RowGroupReader},
        serialized_reader::SerializedFileReader,
        writer::SerializedFileWriter,
    },
    schema::types::Type,
};
use parquet2::encoding::Encoding as PageEncoding;
use qdbr_int32::parquet_read::decoders::{Int32Decoder, Int32Dictionary};
use qdbr_int32::parquet_read::{DataPage, DictPage, Int32PageDecoder, Output};

pub const COUNT: usize = 4096;

pub const VERSIONS: [WriterVersion; 2] = [WriterVersion::PARQUET_1_0, WriterVersion::PARQUET_2_0];

#[derive(Debug, Clone, Copy)]
pub enum Encoding {
    Plain,
    RleDictionary,
    DeltaBinaryPacked,
}

pub const ENCODINGS: [Encoding; 3] = [
    Encoding::Plain,
    Encoding::RleDictionary,
    Encoding::DeltaBinaryPacked,
];

pub fn props(version: WriterVersion, encoding: Encoding) -> WriterProperties {
    let props = WriterProperties::builder()
        .set_writer_version(version)
        .set_write_batch_size(128)
        .set_data_page_row_count_limit(1000);
    match encoding {
        Encoding::Plain => props
            .set_dictionary_enabled(false)
            .set_encoding(ParquetEncoding::PLAIN),
        Encoding::DeltaBinaryPacked => props
            .set_dictionary_enabled(false)
            .set_encoding(ParquetEncoding::DELTA_BINARY_PACKED),
        Encoding::RleDictionary => props.set_dictionary_enabled(true),
    }
    .build()
}

/// Write a single required INT32 column and return the file bytes.
pub fn write_int32_column(data: &[i32], props: WriterProperties) -> Vec<u8> {
    let column = Type::primitive_type_builder("col", PhysicalType::INT32)
        .with_repetition(Repetition::REQUIRED)
        .build()
        .expect("column type");
    let schema = Type::group_type_builder("schema")
        .with_fields(vec![Arc::new(column)])
        .build()
        .expect("schema");

    let mut cursor = Cursor::new(Vec::new());
    let mut file_writer =
        SerializedFileWriter::new(&mut cursor, Arc::new(schema), Arc::new(props))
            .expect("create file writer");

    let mut row_group_writer = file_writer.next_row_group().expect("next row group");
    if let Some(mut col_writer) = row_group_writer.next_column().expect("next column") {
        col_writer
            .typed::<Int32Type>()
            .write_batch(data, None, None)
            .expect("write_batch");
        col_writer.close().expect("close column writer");
    }
    row_group_writer.close().expect("close row group writer");
    file_writer.close().expect("close file writer");

    cursor.into_inner()
}

fn page_encoding(encoding: ParquetEncoding) -> PageEncoding {
    match encoding {
        ParquetEncoding::PLAIN => PageEncoding::Plain,
        ParquetEncoding::PLAIN_DICTIONARY => PageEncoding::PlainDictionary,
        ParquetEncoding::RLE_DICTIONARY => PageEncoding::RleDictionary,
        ParquetEncoding::DELTA_BINARY_PACKED => PageEncoding::DeltaBinaryPacked,
        other => panic!("unexpected page encoding {other:?}"),
    }
}

/// An uncompressed page of the column: its parquet2 encoding, values section and value count.
pub enum RawPage {
    Dict { buffer: Vec<u8>, num_values: usize, is_sorted: bool },
    Data { encoding: PageEncoding, buffer: Vec<u8>, num_values: usize },
}

/// Reads the pages of the only column of the first row group.
pub fn read_pages(file: Vec<u8>) -> Vec<RawPage> {
    let reader = SerializedFileReader::new(bytes::Bytes::from(file)).expect("open file");
    let row_group = reader.get_row_group(0).expect("row group");
    let page_reader = row_group.get_column_page_reader(0).expect("page reader");

    page_reader
        .map(|page| match page.expect("read page") {
            Page::DictionaryPage { buf, num_values, is_sorted, .. } => RawPage::Dict {
                buffer: buf.to_vec(),
                num_values: num_values as usize,
                is_sorted,
            },
            Page::DataPage { buf, num_values, encoding, .. } => RawPage::Data {
                encoding: page_encoding(encoding),
                buffer: buf.to_vec(),
                num_values: num_values as usize,
            },
            Page::DataPageV2 {
                buf,
                num_values,
                encoding,
                def_levels_byte_len,
                rep_levels_byte_len,
                ..
            } => {
                let levels = (def_levels_byte_len + rep_levels_byte_len) as usize;
                RawPage::Data {
                    encoding: page_encoding(encoding),
                    buffer: buf[levels..].to_vec(),
                    num_values: num_values as usize,
                }
            }
        })
        .collect()
}

/// Decodes every data page, writing at most `capacity` values per call.
pub fn decode_pages(pages: &[RawPage], capacity: usize) -> Vec<i32> {
    let mut dict: Option<Int32Dictionary> = None;
    let mut values = Vec::new();
    let mut buf = vec![0i32; capacity];

    for page in pages {
        match page {
            RawPage::Dict { buffer, num_values, is_sorted } => {
                let page = DictPage { buffer, num_values: *num_values, is_sorted: *is_sorted };
                dict = Some(Int32Dictionary::try_new(&page).expect("dictionary page"));
            }
            RawPage::Data { encoding, buffer, num_values } => {
                let page = DataPage::new(*encoding, buffer, *num_values);
                let mut decoder =
                    Int32PageDecoder::try_new(&page, dict.as_ref()).expect("page decoder");
                let start = values.len();
                loop {
                    match decoder.decode(Output::Int32(&mut buf)) {
                        Ok(n) => values.extend_from_slice(&buf[..n]),
                        Err(err) if err.is_no_more_data() => break,
                        Err(err) => panic!("decode {encoding:?} page: {err}"),
                    }
                }
                assert_eq!(values.len() - start, *num_values);
            }
        }
    }
    values
}

pub fn data_encodings(pages: &[RawPage]) -> Vec<PageEncoding> {
    pages
        .iter()
        .filter_map(|page| match page {
            RawPage::Data { encoding, .. } => Some(*encoding),
            RawPage::Dict { .. } => None,
        })
        .collect()
}
