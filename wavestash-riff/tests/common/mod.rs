//! Helpers for assembling WAVE files byte by byte.

#![allow(dead_code)]

pub const PCM_SUBFORMAT: [u8; 16] = [
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xaa, 0x00, 0x38, 0x9b, 0x71,
];

#[derive(Debug, Clone, Default)]
pub struct WaveBuilder {
    bytes: Vec<u8>,
}

impl WaveBuilder {
    /// Starts a file with a `RIFF`/`WAVE` envelope declaring `chunk_size`.
    pub fn riff(chunk_size: u32) -> Self {
        Self::default()
            .raw(b"RIFF")
            .raw(&chunk_size.to_le_bytes())
            .raw(b"WAVE")
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Appends a chunk whose declared size is the length of `body`.
    pub fn chunk(self, tag: &[u8; 4], body: &[u8]) -> Self {
        self.raw(tag).raw(&(body.len() as u32).to_le_bytes()).raw(body)
    }

    pub fn pcm_format(self, channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        self.chunk(b"fmt ", &pcm_format_body(channels, sample_rate, bits_per_sample))
    }

    pub fn data(self, samples: &[u8]) -> Self {
        self.chunk(b"data", samples)
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

pub fn pcm_format_body(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Vec<u8> {
    let block_align = channels * (bits_per_sample / 8);
    let mut body = vec![];
    body.extend_from_slice(&1u16.to_le_bytes());
    body.extend_from_slice(&channels.to_le_bytes());
    body.extend_from_slice(&sample_rate.to_le_bytes());
    body.extend_from_slice(&(sample_rate * u32::from(block_align)).to_le_bytes());
    body.extend_from_slice(&block_align.to_le_bytes());
    body.extend_from_slice(&bits_per_sample.to_le_bytes());
    body
}

/// 40-byte `WAVE_FORMAT_EXTENSIBLE` body carrying PCM samples.
pub fn extensible_format_body(
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    valid_bits: u16,
    channel_mask: u32,
) -> Vec<u8> {
    let mut body = pcm_format_body(channels, sample_rate, bits_per_sample);
    body[0..2].copy_from_slice(&0xFFFEu16.to_le_bytes());
    body.extend_from_slice(&22u16.to_le_bytes());
    body.extend_from_slice(&valid_bits.to_le_bytes());
    body.extend_from_slice(&channel_mask.to_le_bytes());
    body.extend_from_slice(&PCM_SUBFORMAT);
    body
}

/// The canonical 44-byte file: 16-bit stereo at 44.1 kHz with an empty data chunk.
pub fn minimal_stereo() -> Vec<u8> {
    WaveBuilder::riff(36).pcm_format(2, 44100, 16).data(&[]).build()
}
