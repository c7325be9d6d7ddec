use serde::Serialize;
use wavestash_core::{primitive::FourCc, Deserialize, FixedSize};

use crate::chunk::tags;

/// The outer RIFF envelope: the first twelve bytes of every WAVE file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, FixedSize, Serialize)]
pub struct Header {
    pub chunk_id: FourCc,
    /// Size of everything following this field, as declared by the file.
    pub chunk_size: u32,
    pub wave_id: FourCc,
}

impl Header {
    /// Whether the envelope carries the `RIFF`/`WAVE` identifiers. Nothing downstream relies on
    /// this, so a mismatch is only worth a warning.
    pub fn is_riff_wave(&self) -> bool {
        self.chunk_id.to_ascii_uppercase() == tags::RIFF
            && self.wave_id.to_ascii_uppercase() == tags::WAVE
    }
}
