use std::io;

use thiserror::Error;
use wavestash_core::{binary, primitive::FourCc};

/// Reasons a parse can fail. All of them are final: the parser does not try to recover, and
/// nothing parsed up to that point is returned.
#[derive(Debug, Error)]
pub enum WaveError {
    #[error("truncated header: expected 12 bytes, got {got}")]
    TruncatedHeader { got: usize },

    #[error("truncated WAVE file: incomplete chunk tag ({got} of 4 bytes)")]
    TruncatedChunkTag { got: usize },

    #[error("truncated WAVE file: incomplete size field for chunk {tag}")]
    TruncatedChunkSize { tag: FourCc },

    #[error("unknown WAVE format type: format chunk of {0} bytes")]
    UnknownFormatSize(u32),

    #[error("truncated WAVE file: format chunk declares {declared} bytes, got {got}")]
    TruncatedFormat { declared: usize, got: usize },

    #[error("truncated WAVE file: data chunk declares {declared} bytes, got {got}")]
    TruncatedData { declared: u32, got: u64 },

    #[error("truncated WAVE file: chunk {tag} declares {declared} bytes, got {got}")]
    TruncatedChunk { tag: FourCc, declared: u32, got: u64 },

    #[error("invalid WAVE file: stream ended before the {missing} was found")]
    IncompleteFile { missing: &'static str },

    #[error("malformed WAVE file: {0}")]
    Malformed(#[from] binary::Error),

    #[error("cannot read WAVE stream")]
    Io(#[from] io::Error),
}

impl WaveError {
    /// Whether the error is the input's fault, as opposed to a failure of the source itself.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
