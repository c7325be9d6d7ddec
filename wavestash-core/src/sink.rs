//! Counting compressor that sits between a parser and its byte source.
//!
//! Every byte pulled through a [`ByteSink`] is counted and fed into a single zlib stream,
//! so once parsing is done the compressed form of everything that was read is available
//! without a second pass over the source.

use std::io::{self, Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use tracing::trace;

/// Upper bound on how much is reserved up front for a single [`ByteSink::consume`].
/// Declared sizes come from untrusted input, so the rest is grown as bytes actually arrive.
const MAX_PREALLOCATION: usize = 64 * 1024;

pub struct ByteSink<R> {
    stream: R,
    bytes_read: u64,
    encoder: ZlibEncoder<Vec<u8>>,
}

impl<R> ByteSink<R>
where
    R: Read,
{
    pub fn new(reader: R) -> Self {
        Self::with_level(reader, Compression::default())
    }

    pub fn with_level(reader: R, level: Compression) -> Self {
        Self {
            stream: reader,
            bytes_read: 0,
            encoder: ZlibEncoder::new(Vec::new(), level),
        }
    }

    /// Total number of bytes read from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Reads up to `limit` bytes (or everything that is left, if `limit` is `None`) and returns
    /// them. Fewer bytes than requested means the source ran dry.
    pub fn consume(&mut self, limit: Option<usize>) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        match limit {
            Some(limit) => {
                buffer.reserve(limit.min(MAX_PREALLOCATION));
                self.stream
                    .by_ref()
                    .take(limit as u64)
                    .read_to_end(&mut buffer)?;
            }
            None => {
                self.stream.read_to_end(&mut buffer)?;
            }
        }
        self.record(&buffer)?;
        Ok(buffer)
    }

    /// Like [`consume`](Self::consume), but streams the bytes straight into the compressor
    /// instead of handing them back. Returns how many bytes were read.
    pub fn skip(&mut self, limit: Option<u64>) -> io::Result<u64> {
        let count = match limit {
            Some(limit) => io::copy(&mut self.stream.by_ref().take(limit), &mut self.encoder)?,
            None => io::copy(&mut self.stream, &mut self.encoder)?,
        };
        self.bytes_read += count;
        trace!(count, total = self.bytes_read, "Skipped bytes");
        Ok(count)
    }

    /// Flushes the compressor and returns the compressed form of every byte read.
    pub fn finish(self) -> io::Result<Vec<u8>> {
        let payload = self.encoder.finish()?;
        trace!(
            read = self.bytes_read,
            compressed = payload.len(),
            "Finished compressing"
        );
        Ok(payload)
    }

    fn record(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.bytes_read += bytes.len() as u64;
        self.encoder.write_all(bytes)?;
        trace!(
            count = bytes.len(),
            total = self.bytes_read,
            "Consumed bytes"
        );
        Ok(())
    }
}

/// Inflates a payload produced by [`ByteSink::finish`].
pub fn decompress(payload: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(payload);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
