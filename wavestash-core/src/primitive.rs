use std::{fmt, io::Read};

use serde::{Serialize, Serializer};

use crate::binary::{Deserialize, Deserializer, Error, FixedSize, ResultContextExt};

/// Four-character code, the tag at the start of every RIFF chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }

    /// Tags are compared case-insensitively, since real files don't always agree on casing.
    pub fn to_ascii_uppercase(self) -> Self {
        Self(self.0.map(|b| b.to_ascii_uppercase()))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl Deserialize for FourCc {
    fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error> {
        deserializer
            .deserialize::<[u8; 4]>()
            .map(Self)
            .context("cannot deserialize FourCc")
    }
}

impl FixedSize for FourCc {
    const SIZE: usize = 4;
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            write!(f, "{}", std::ascii::escape_default(byte))?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{self}'")
    }
}

impl Serialize for FourCc {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
