//! The `fmt ` sub-chunk.
//!
//! Writers disagree on how much of the format record they emit: plain PCM files stop after
//! `bits_per_sample` (16 bytes), some add `extension_size` (18 bytes), and extensible files
//! carry the full 40 bytes including the channel mask and sub-format GUID. Rather than
//! special-casing each of these, the record is described as an ordered table of fixed-width
//! fields, and the chunk's declared size selects how many of them are present.

use std::io::Read;

use serde::Serialize;
use wavestash_core::{
    binary::{Deserializer, Error, FixedSize, ResultContextExt},
    uuid::Uuid,
};

pub const WAVE_FORMAT_PCM: u16 = 0x0001;
pub const WAVE_FORMAT_IEEE_FLOAT: u16 = 0x0003;
pub const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Parsed `fmt ` chunk. A field is `None` when the chunk ended before reaching it, which is
/// not the same as the file storing a zero there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Format {
    pub format_tag: Option<u16>,
    pub channels: Option<u16>,
    pub samples_per_second: Option<u32>,
    pub average_bytes_per_second: Option<u32>,
    pub block_align: Option<u16>,
    pub bits_per_sample: Option<u16>,
    pub extension_size: Option<u16>,
    pub valid_bits_per_sample: Option<u16>,
    pub channel_mask: Option<u32>,
    pub subformat: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatField {
    FormatTag,
    Channels,
    SamplesPerSecond,
    AverageBytesPerSecond,
    BlockAlign,
    BitsPerSample,
    ExtensionSize,
    ValidBitsPerSample,
    ChannelMask,
    Subformat,
}

impl FormatField {
    pub fn name(self) -> &'static str {
        match self {
            Self::FormatTag => "format_tag",
            Self::Channels => "channels",
            Self::SamplesPerSecond => "samples_per_second",
            Self::AverageBytesPerSecond => "average_bytes_per_second",
            Self::BlockAlign => "block_align",
            Self::BitsPerSample => "bits_per_sample",
            Self::ExtensionSize => "extension_size",
            Self::ValidBitsPerSample => "valid_bits_per_sample",
            Self::ChannelMask => "channel_mask",
            Self::Subformat => "subformat",
        }
    }
}

pub const FIELD_COUNT: usize = 10;

/// Fields of the format record in on-disk order, with their widths in bytes.
pub const FORMAT_LAYOUT: [(FormatField, usize); FIELD_COUNT] = [
    (FormatField::FormatTag, u16::SIZE),
    (FormatField::Channels, u16::SIZE),
    (FormatField::SamplesPerSecond, u32::SIZE),
    (FormatField::AverageBytesPerSecond, u32::SIZE),
    (FormatField::BlockAlign, u16::SIZE),
    (FormatField::BitsPerSample, u16::SIZE),
    (FormatField::ExtensionSize, u16::SIZE),
    (FormatField::ValidBitsPerSample, u16::SIZE),
    (FormatField::ChannelMask, u32::SIZE),
    (FormatField::Subformat, <Uuid as FixedSize>::SIZE),
];

/// `PREFIX_SIZES[n]` is the packed size of the first `n` fields of [`FORMAT_LAYOUT`].
pub const PREFIX_SIZES: [usize; FIELD_COUNT + 1] = prefix_sizes();

const fn prefix_sizes() -> [usize; FIELD_COUNT + 1] {
    let mut sizes = [0; FIELD_COUNT + 1];
    let mut i = 0;
    while i < FIELD_COUNT {
        sizes[i + 1] = sizes[i] + FORMAT_LAYOUT[i].1;
        i += 1;
    }
    sizes
}

/// Number of leading fields whose packed size is exactly `declared_size`, if any.
pub fn fields_for_size(declared_size: u32) -> Option<usize> {
    PREFIX_SIZES
        .iter()
        .position(|&size| size as u64 == u64::from(declared_size))
}

impl Format {
    /// Deserializes the first `field_count` fields of [`FORMAT_LAYOUT`], leaving the rest unset.
    pub fn deserialize_prefix(
        deserializer: &mut Deserializer<impl Read>,
        field_count: usize,
    ) -> Result<Self, Error> {
        let mut format = Self::default();
        for &(field, _) in &FORMAT_LAYOUT[..field_count.min(FIELD_COUNT)] {
            format
                .deserialize_field(deserializer, field)
                .with_context(|| format!("cannot deserialize field Format::{}", field.name()))?;
        }
        Ok(format)
    }

    fn deserialize_field(
        &mut self,
        deserializer: &mut Deserializer<impl Read>,
        field: FormatField,
    ) -> Result<(), Error> {
        match field {
            FormatField::FormatTag => self.format_tag = Some(deserializer.deserialize()?),
            FormatField::Channels => self.channels = Some(deserializer.deserialize()?),
            FormatField::SamplesPerSecond => {
                self.samples_per_second = Some(deserializer.deserialize()?)
            }
            FormatField::AverageBytesPerSecond => {
                self.average_bytes_per_second = Some(deserializer.deserialize()?)
            }
            FormatField::BlockAlign => self.block_align = Some(deserializer.deserialize()?),
            FormatField::BitsPerSample => self.bits_per_sample = Some(deserializer.deserialize()?),
            FormatField::ExtensionSize => self.extension_size = Some(deserializer.deserialize()?),
            FormatField::ValidBitsPerSample => {
                self.valid_bits_per_sample = Some(deserializer.deserialize()?)
            }
            FormatField::ChannelMask => self.channel_mask = Some(deserializer.deserialize()?),
            FormatField::Subformat => self.subformat = Some(deserializer.deserialize()?),
        }
        Ok(())
    }

    pub fn is_extensible(&self) -> bool {
        self.format_tag == Some(WAVE_FORMAT_EXTENSIBLE)
    }

    /// Number of fields that were present in the chunk.
    pub fn present_fields(&self) -> usize {
        [
            self.format_tag.is_some(),
            self.channels.is_some(),
            self.samples_per_second.is_some(),
            self.average_bytes_per_second.is_some(),
            self.block_align.is_some(),
            self.bits_per_sample.is_some(),
            self.extension_size.is_some(),
            self.valid_bits_per_sample.is_some(),
            self.channel_mask.is_some(),
            self.subformat.is_some(),
        ]
        .into_iter()
        .filter(|&present| present)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use wavestash_core::binary::Deserializer;

    use super::{fields_for_size, Format, FIELD_COUNT, PREFIX_SIZES, WAVE_FORMAT_PCM};

    #[test]
    fn prefix_sizes_follow_field_widths() {
        assert_eq!(PREFIX_SIZES, [0, 2, 4, 8, 12, 14, 16, 18, 20, 24, 40]);
    }

    #[test]
    fn common_chunk_sizes_are_recognized() {
        assert_eq!(fields_for_size(16), Some(6));
        assert_eq!(fields_for_size(18), Some(7));
        assert_eq!(fields_for_size(40), Some(FIELD_COUNT));
        assert_eq!(fields_for_size(0), Some(0));
    }

    #[test]
    fn sizes_between_fields_are_rejected() {
        for size in [1, 17, 22, 26, 39, 41, u32::MAX] {
            assert_eq!(fields_for_size(size), None, "size {size}");
        }
    }

    #[test]
    fn missing_fields_stay_unset() {
        let mut bytes = vec![];
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&44100u32.to_le_bytes());
        bytes.extend_from_slice(&176400u32.to_le_bytes());
        bytes.extend_from_slice(&4u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());

        let format =
            Format::deserialize_prefix(&mut Deserializer::from_buffer(bytes.as_slice()), 7)
                .unwrap();
        assert_eq!(format.format_tag, Some(WAVE_FORMAT_PCM));
        assert_eq!(format.channels, Some(2));
        assert_eq!(format.samples_per_second, Some(44100));
        assert_eq!(format.bits_per_sample, Some(16));
        // Stored as zero, which is different from absent.
        assert_eq!(format.extension_size, Some(0));
        assert_eq!(format.valid_bits_per_sample, None);
        assert_eq!(format.subformat, None);
        assert_eq!(format.present_fields(), 7);
    }

    #[test]
    fn short_buffer_names_the_field() {
        let error = Format::deserialize_prefix(&mut Deserializer::from_buffer(&[1u8, 0, 2][..]), 2)
            .unwrap_err();
        assert!(error.to_string().contains("Format::channels"), "{error}");
    }
}
