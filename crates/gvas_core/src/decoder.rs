use std::io::{Cursor, Read, Seek};

use tracing::{debug, instrument};

use crate::context::{DecodeContext, DecodeOptions};
use crate::error::Result;
use crate::field_list::decode_field_list;
use crate::header::Metadata;
use crate::reader::LittleEndianReader;
use crate::value::Document;

/// Entry point for decoding saves with a fixed set of limits.
#[derive(Debug, Default, Clone, Copy)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode only the header. The source must be positioned at offset 0.
    #[instrument(skip_all)]
    pub fn decode_metadata<R: Read>(&self, reader: R) -> Result<Metadata> {
        let mut r = LittleEndianReader::new(reader);
        Metadata::parse(&mut r, self.options.max_element_count)
    }

    /// Decode a full document. At offset 0 the header is decoded first;
    /// anywhere else the source is assumed to be past it already and the
    /// document carries no metadata.
    #[instrument(skip_all)]
    pub fn decode_document<R: Read + Seek>(&self, reader: R) -> Result<Document> {
        let r = LittleEndianReader::from_stream(reader)?;
        let mut ctx = DecodeContext::new(r, self.options);

        let metadata = if ctx.reader.position() == 0 {
            Some(Metadata::parse(
                &mut ctx.reader,
                self.options.max_element_count,
            )?)
        } else {
            debug!(
                offset = ctx.reader.position(),
                "stream past header, skipping metadata"
            );
            None
        };

        let properties = decode_field_list(&mut ctx)?;
        debug!(
            fields = properties.len(),
            end_offset = ctx.reader.position(),
            "decoded document"
        );

        Ok(Document {
            metadata,
            properties,
        })
    }

    pub fn decode_bytes<B: AsRef<[u8]>>(&self, bytes: B) -> Result<Document> {
        self.decode_document(Cursor::new(bytes.as_ref()))
    }
}

/// [`Decoder::decode_metadata`] with default limits.
pub fn decode_metadata<R: Read>(reader: R) -> Result<Metadata> {
    Decoder::new().decode_metadata(reader)
}

/// [`Decoder::decode_document`] with default limits.
pub fn decode_document<R: Read + Seek>(reader: R) -> Result<Document> {
    Decoder::new().decode_document(reader)
}
