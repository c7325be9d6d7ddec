use std::io::Read;

use tracing::{debug, trace, warn};
use wavestash_core::{
    binary::{deserialize, Deserializer, FixedSize},
    primitive::FourCc,
    sink::ByteSink,
};

use crate::{
    chunk::{tags, ChunkKind},
    format::{self, Format},
    options::{ParseOptions, UnknownChunkPolicy},
    Header, ParsedWave, WaveError,
};

/// Single-pass WAVE parser.
///
/// Walks the chunks of a RIFF stream front to back, never seeking, and compresses every byte
/// it reads along the way. The parser is consumed by [`parse`](Self::parse), so each
/// instance runs at most once.
pub struct WaveParser<R> {
    sink: ByteSink<R>,
    options: ParseOptions,
    format: Option<Format>,
    data_size: Option<u32>,
}

impl<R> WaveParser<R>
where
    R: Read,
{
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParseOptions::default())
    }

    pub fn with_options(reader: R, options: ParseOptions) -> Self {
        Self {
            sink: ByteSink::with_level(reader, options.compression),
            options,
            format: None,
            data_size: None,
        }
    }

    pub fn parse(mut self) -> Result<ParsedWave, WaveError> {
        let header = self.parse_header()?;
        debug!(?header, "Read RIFF header");
        if !header.is_riff_wave() {
            warn!(
                chunk_id = %header.chunk_id,
                wave_id = %header.wave_id,
                "File does not identify itself as RIFF/WAVE; parsing anyway"
            );
        }

        while let Some(tag) = self.read_chunk_tag()? {
            trace!(%tag, offset = self.sink.bytes_read() - 4, "Found chunk");
            match ChunkKind::from(tag) {
                ChunkKind::Format => {
                    let format = self.parse_format()?;
                    if self.format.is_some() {
                        warn!("Found more than one format chunk; the last one wins");
                    }
                    debug!(?format, "Read format chunk");
                    self.format = Some(format);
                }
                ChunkKind::Data => {
                    let size = self.parse_data()?;
                    debug!(size, "Read data chunk");
                    self.data_size = Some(size);
                }
                ChunkKind::Unknown(tag) => self.skip_unknown(tag)?,
            }
        }

        let Some(format) = self.format else {
            return Err(WaveError::IncompleteFile {
                missing: "format chunk",
            });
        };

        let bytes_read = self.sink.bytes_read();
        let payload = self.sink.finish()?;
        debug!(
            "Compressed {bytes_read} bytes to {} bytes ({:.1}%)",
            payload.len(),
            if bytes_read == 0 {
                0.0
            } else {
                payload.len() as f64 / bytes_read as f64 * 100.0
            }
        );

        Ok(ParsedWave {
            header,
            format,
            data_size: self.data_size,
            bytes_read,
            payload,
        })
    }

    fn parse_header(&mut self) -> Result<Header, WaveError> {
        let bytes = self.sink.consume(Some(Header::SIZE))?;
        if bytes.len() != Header::SIZE {
            return Err(WaveError::TruncatedHeader { got: bytes.len() });
        }
        Ok(deserialize(&bytes)?)
    }

    /// Returns `None` once the stream is exhausted.
    fn read_chunk_tag(&mut self) -> Result<Option<FourCc>, WaveError> {
        let bytes = self.sink.consume(Some(FourCc::SIZE))?;
        if bytes.is_empty() {
            return Ok(None);
        }
        if bytes.len() != FourCc::SIZE {
            return Err(WaveError::TruncatedChunkTag { got: bytes.len() });
        }
        let tag = deserialize::<FourCc>(&bytes)?;
        Ok(Some(tag.to_ascii_uppercase()))
    }

    fn read_chunk_size(&mut self, tag: FourCc) -> Result<u32, WaveError> {
        let bytes = self.sink.consume(Some(u32::SIZE))?;
        if bytes.len() != u32::SIZE {
            return Err(WaveError::TruncatedChunkSize { tag });
        }
        Ok(deserialize(&bytes)?)
    }

    fn parse_format(&mut self) -> Result<Format, WaveError> {
        let declared = self.read_chunk_size(tags::FMT)?;
        let field_count =
            format::fields_for_size(declared).ok_or(WaveError::UnknownFormatSize(declared))?;
        let size = format::PREFIX_SIZES[field_count];
        trace!(declared, field_count, "Matched format layout");

        let bytes = self.sink.consume(Some(size))?;
        if bytes.len() != size {
            return Err(WaveError::TruncatedFormat {
                declared: size,
                got: bytes.len(),
            });
        }
        Ok(Format::deserialize_prefix(
            &mut Deserializer::from_buffer(bytes.as_slice()),
            field_count,
        )?)
    }

    /// Samples are compressed along with everything else but not kept around on their own.
    fn parse_data(&mut self) -> Result<u32, WaveError> {
        let declared = self.read_chunk_size(tags::DATA)?;
        let got = self.sink.skip(Some(u64::from(declared)))?;
        if got != u64::from(declared) {
            return Err(WaveError::TruncatedData { declared, got });
        }
        Ok(declared)
    }

    fn skip_unknown(&mut self, tag: FourCc) -> Result<(), WaveError> {
        match self.options.unknown_chunks {
            UnknownChunkPolicy::SkipDeclared => {
                let declared = self.read_chunk_size(tag)?;
                let got = self.sink.skip(Some(u64::from(declared)))?;
                if got != u64::from(declared) {
                    return Err(WaveError::TruncatedChunk { tag, declared, got });
                }
                // Odd-sized chunks are followed by a pad byte, which a file may omit at the end.
                if declared % 2 == 1 && self.sink.skip(Some(1))? == 0 {
                    trace!(%tag, "Pad byte missing at end of stream");
                }
                debug!(%tag, size = declared, "Skipped unknown chunk");
            }
            UnknownChunkPolicy::ConsumeToEnd => {
                let got = self.sink.skip(None)?;
                debug!(%tag, size = got, "Skipped unknown chunk and the rest of the stream");
            }
        }
        Ok(())
    }
}
