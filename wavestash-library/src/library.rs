use std::{collections::BTreeMap, io::Read};

use tracing::{debug, info, warn};
use uuid::Uuid;
use wavestash_riff::{ParseOptions, WaveParser};

use crate::{AssetInfo, AudioAsset, LibraryError, Query};

/// In-memory collection of parsed audio files, keyed by name.
#[derive(Debug, Default)]
pub struct Library {
    options: ParseOptions,
    assets: BTreeMap<String, AudioAsset>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            assets: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Parses `reader` and stores the result under `name`, replacing any earlier file with the
    /// same name. Nothing is stored if parsing fails.
    pub fn ingest(&mut self, name: &str, reader: impl Read) -> Result<AssetInfo, LibraryError> {
        let asset = self.parse(name, reader)?;
        Ok(self.insert(asset))
    }

    /// Like [`ingest`](Self::ingest), for uploads that arrive without a file name.
    pub fn ingest_unnamed(&mut self, reader: impl Read) -> Result<AssetInfo, LibraryError> {
        let name = format!("{}.wav", Uuid::new_v4());
        self.ingest(&name, reader)
    }

    /// Ingests several files at once. Either all of them are stored, or, if any one fails to
    /// parse, none are.
    pub fn ingest_batch<'a, R>(
        &mut self,
        files: impl IntoIterator<Item = (&'a str, R)>,
    ) -> Result<Vec<AssetInfo>, LibraryError>
    where
        R: Read,
    {
        let assets = files
            .into_iter()
            .map(|(name, reader)| self.parse(name, reader))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(assets.into_iter().map(|asset| self.insert(asset)).collect())
    }

    pub fn info(&self, name: &str) -> Result<AssetInfo, LibraryError> {
        self.get(name).map(AudioAsset::info)
    }

    /// Returns the original bytes of the named file.
    pub fn download(&self, name: &str) -> Result<Vec<u8>, LibraryError> {
        self.get(name)?.decompress()
    }

    pub fn get(&self, name: &str) -> Result<&AudioAsset, LibraryError> {
        self.assets
            .get(name)
            .ok_or_else(|| LibraryError::NotFound(name.to_owned()))
    }

    /// Assets matching `query`, ordered by name.
    pub fn list(&self, query: &Query) -> Vec<AssetInfo> {
        self.assets
            .values()
            .map(AudioAsset::info)
            .filter(|info| query.matches(info))
            .collect()
    }

    fn parse(&self, name: &str, reader: impl Read) -> Result<AudioAsset, LibraryError> {
        debug!(name, "Parsing upload");
        let parsed = WaveParser::with_options(reader, self.options)
            .parse()
            .map_err(|error| {
                warn!(name, %error, "Rejected upload");
                error
            })?;
        AudioAsset::from_parsed(name, parsed)
    }

    fn insert(&mut self, asset: AudioAsset) -> AssetInfo {
        let info = asset.info();
        info!(
            name = %info.name,
            runtime_sec = info.runtime_sec,
            size = info.size,
            "Stored audio file"
        );
        if self.assets.insert(asset.name.clone(), asset).is_some() {
            debug!(name = %info.name, "Replaced existing file");
        }
        info
    }
}
