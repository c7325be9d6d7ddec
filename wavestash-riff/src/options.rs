use flate2::Compression;

/// What to do with a chunk whose tag the parser doesn't interpret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownChunkPolicy {
    /// Read the chunk's size field and skip exactly that many bytes, then keep scanning.
    #[default]
    SkipDeclared,
    /// Treat everything from the unknown tag onwards as opaque and stop scanning. Any `data`
    /// chunk after the unknown one is never looked at.
    ConsumeToEnd,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub unknown_chunks: UnknownChunkPolicy,
    pub compression: Compression,
}
