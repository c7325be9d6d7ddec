//! Streaming parser for RIFF/WAVE files.
//!
//! The parser reads a WAVE file once, front to back, and produces the outer [`Header`], the
//! [`Format`] record, and a zlib-compressed copy of every byte it read. Only the `fmt ` and
//! `data` chunks are interpreted; everything else is skipped.

use std::io::Read;

pub mod chunk;
pub mod error;
pub mod format;
pub mod header;
pub mod options;
pub mod parser;

pub use error::WaveError;
pub use format::Format;
pub use header::Header;
pub use options::{ParseOptions, UnknownChunkPolicy};
pub use parser::WaveParser;

#[derive(Debug, Clone)]
pub struct ParsedWave {
    pub header: Header,
    pub format: Format,
    /// Declared size of the last `data` chunk seen, if there was one.
    pub data_size: Option<u32>,
    /// How many bytes were read from the source, i.e. the uncompressed size of `payload`.
    pub bytes_read: u64,
    /// zlib stream holding every byte read from the source, in order.
    pub payload: Vec<u8>,
}

pub fn parse_wave(reader: impl Read) -> Result<ParsedWave, WaveError> {
    WaveParser::new(reader).parse()
}
