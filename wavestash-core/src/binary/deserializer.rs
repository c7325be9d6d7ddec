use std::{
    io::{self, Cursor, Read},
    ops::Deref,
};

use crate::binary::{Error, ErrorKind, ResultContextExt};

/// Reads fixed-width values out of a byte stream, keeping track of how far into the stream
/// it is so that errors can point at the offending offset.
#[derive(Debug, Clone, Copy)]
pub struct Deserializer<R> {
    stream_position: u64,
    stream: R,
}

impl<R> Deserializer<R> {
    pub fn position(&self) -> u64 {
        self.stream_position
    }

    pub fn read_bytes(&mut self, out_bytes: &mut [u8]) -> Result<(), Error>
    where
        R: Read,
    {
        self.stream
            .read_exact(out_bytes)
            .map_err(|error| match error.kind() {
                io::ErrorKind::UnexpectedEof => ErrorKind::UnexpectedEof.make(format!(
                    "{} bytes requested but the stream ended first",
                    out_bytes.len()
                )),
                _ => ErrorKind::Deserialize.make(error.to_string()),
            })
            .with_context(|| format!("at stream position {:08x}", self.stream_position))?;
        self.stream_position += out_bytes.len() as u64;
        Ok(())
    }
}

impl<T> Deserializer<Cursor<T>>
where
    T: Deref<Target = [u8]>,
{
    pub fn from_buffer(buffer: T) -> Self {
        Self::from(Cursor::new(buffer))
    }
}

impl<T> From<Cursor<T>> for Deserializer<Cursor<T>>
where
    T: Deref<Target = [u8]>,
{
    fn from(cursor: Cursor<T>) -> Self {
        Self {
            stream_position: cursor.position(),
            stream: cursor,
        }
    }
}
