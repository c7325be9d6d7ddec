use serde::Serialize;
use wavestash_core::sink;
use wavestash_riff::{Format, Header, ParsedWave};

use crate::LibraryError;

/// A stored audio file: the compressed bytes plus what was learned about them while parsing.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    pub name: String,
    /// zlib-compressed copy of the uploaded file.
    pub data: Vec<u8>,
    pub runtime_sec: f64,
    pub channels: u16,
    pub bitwidth: u16,
    pub sample_rate: u32,
    pub header: Header,
    pub format: Format,
}

/// The public view of an [`AudioAsset`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetInfo {
    pub name: String,
    /// Size of the compressed data in bytes.
    pub size: usize,
    pub runtime_sec: f64,
    pub channels: u16,
    pub bitwidth: u16,
    pub sample_rate: u32,
}

impl AudioAsset {
    pub fn from_parsed(name: impl Into<String>, parsed: ParsedWave) -> Result<Self, LibraryError> {
        let format = parsed.format;
        let channels = nonzero(format.channels, "channel count")?;
        let bitwidth = nonzero(format.bits_per_sample, "bits per sample")?;
        let sample_rate = nonzero(format.samples_per_second, "sample rate")?;

        Ok(Self {
            name: name.into(),
            runtime_sec: estimate_runtime(&parsed.header, channels, bitwidth, sample_rate),
            data: parsed.payload,
            channels,
            bitwidth,
            sample_rate,
            header: parsed.header,
            format,
        })
    }

    pub fn info(&self) -> AssetInfo {
        AssetInfo {
            name: self.name.clone(),
            size: self.data.len(),
            runtime_sec: self.runtime_sec,
            channels: self.channels,
            bitwidth: self.bitwidth,
            sample_rate: self.sample_rate,
        }
    }

    /// The original file, byte for byte.
    pub fn decompress(&self) -> Result<Vec<u8>, LibraryError> {
        sink::decompress(&self.data).map_err(LibraryError::internal)
    }

    pub fn header_json(&self) -> Result<String, LibraryError> {
        serde_json::to_string(&self.header).map_err(LibraryError::internal)
    }

    pub fn format_json(&self) -> Result<String, LibraryError> {
        serde_json::to_string(&self.format).map_err(LibraryError::internal)
    }
}

/// Approximate playing time in seconds.
///
/// This uses the RIFF envelope's declared size rather than the size of the `data` chunk, so it
/// overestimates slightly by counting the format chunk and any metadata as samples.
pub fn estimate_runtime(header: &Header, channels: u16, bitwidth: u16, sample_rate: u32) -> f64 {
    let bits_per_second = f64::from(channels) * f64::from(bitwidth) * f64::from(sample_rate);
    8.0 * f64::from(header.chunk_size) / bits_per_second
}

fn nonzero<T>(value: Option<T>, field: &'static str) -> Result<T, LibraryError>
where
    T: Copy + Default + PartialEq,
{
    match value {
        Some(value) if value != T::default() => Ok(value),
        _ => Err(LibraryError::DegenerateFormat { field }),
    }
}

#[cfg(test)]
mod tests {
    use wavestash_core::primitive::FourCc;
    use wavestash_riff::{Format, Header, ParsedWave};

    use super::{estimate_runtime, AudioAsset};
    use crate::LibraryError;

    fn header(chunk_size: u32) -> Header {
        Header {
            chunk_id: FourCc::new(b"RIFF"),
            chunk_size,
            wave_id: FourCc::new(b"WAVE"),
        }
    }

    #[test]
    fn runtime_uses_the_riff_size() {
        let runtime = estimate_runtime(&header(36), 2, 16, 44100);
        assert!((runtime - 288.0 / 1_411_200.0).abs() < 1e-12);
        assert!((runtime - 0.000204).abs() < 1e-6);
    }

    #[test]
    fn one_second_of_cd_audio() {
        let runtime = estimate_runtime(&header(176_400), 2, 16, 44100);
        assert!((runtime - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_channels_is_degenerate() {
        let parsed = ParsedWave {
            header: header(36),
            format: Format {
                channels: Some(0),
                bits_per_sample: Some(16),
                samples_per_second: Some(44100),
                ..Default::default()
            },
            data_size: None,
            bytes_read: 0,
            payload: vec![],
        };
        let error = AudioAsset::from_parsed("a.wav", parsed).unwrap_err();
        assert!(matches!(
            error,
            LibraryError::DegenerateFormat {
                field: "channel count"
            }
        ));
        assert!(error.is_client_error());
    }
}
