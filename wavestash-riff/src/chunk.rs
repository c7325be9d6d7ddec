use wavestash_core::primitive::FourCc;

pub mod tags {
    use wavestash_core::primitive::FourCc;

    pub const RIFF: FourCc = FourCc::new(b"RIFF");
    pub const WAVE: FourCc = FourCc::new(b"WAVE");
    pub const FMT: FourCc = FourCc::new(b"FMT ");
    pub const DATA: FourCc = FourCc::new(b"DATA");
}

/// What the parser does with a sub-chunk, decided from its (uppercased) tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Format,
    Data,
    Unknown(FourCc),
}

impl From<FourCc> for ChunkKind {
    fn from(tag: FourCc) -> Self {
        match tag.to_ascii_uppercase() {
            tags::FMT => Self::Format,
            tags::DATA => Self::Data,
            other => Self::Unknown(other),
        }
    }
}
