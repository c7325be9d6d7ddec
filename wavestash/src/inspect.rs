use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use clap::Subcommand;
use tracing::{debug, info};
use wavestash_library::AudioAsset;
use wavestash_riff::{
    format::{WAVE_FORMAT_EXTENSIBLE, WAVE_FORMAT_IEEE_FLOAT, WAVE_FORMAT_PCM},
    ParseOptions, ParsedWave, WaveParser,
};

#[derive(Clone, Copy, Subcommand)]
pub enum Inspect {
    /// Dump the outer RIFF header.
    Header,
    /// Dump the format chunk. Fields the file doesn't contain are shown as `None`.
    Format,
    /// Print the metadata that would be stored for this file, as JSON.
    Asset,
    /// Print the header and format records as they would be stored, one JSON object per line.
    Record,
    /// Print how large the compressed payload is compared to the input.
    Payload,
}

pub fn inspect(filename: &Path, what: Inspect, options: ParseOptions) -> anyhow::Result<()> {
    info!(?filename, "Opening WAVE file");
    let reader = BufReader::new(
        File::open(filename).with_context(|| format!("cannot open {}", filename.display()))?,
    );

    debug!("Parsing");
    let parsed = WaveParser::with_options(reader, options)
        .parse()
        .with_context(|| format!("cannot parse {}", filename.display()))?;

    match what {
        Inspect::Header => {
            println!("{:#?}", parsed.header);
        }
        Inspect::Format => {
            if let Some(tag) = parsed.format.format_tag {
                debug!("Format tag {tag:#06x} is {}", format_tag_name(tag));
            }
            println!("{:#?}", parsed.format);
        }
        Inspect::Asset => {
            let asset = asset(filename, parsed)?;
            println!("{}", serde_json::to_string_pretty(&asset.info())?);
        }
        Inspect::Record => {
            for line in record_lines(&asset(filename, parsed)?)? {
                println!("{line}");
            }
        }
        Inspect::Payload => {
            let compressed = parsed.payload.len();
            println!(
                "{} bytes read, {compressed} bytes compressed ({:.1}%)",
                parsed.bytes_read,
                if parsed.bytes_read == 0 {
                    0.0
                } else {
                    compressed as f64 / parsed.bytes_read as f64 * 100.0
                }
            );
            if let Some(data_size) = parsed.data_size {
                println!("data chunk: {data_size} bytes");
            }
        }
    }

    Ok(())
}

fn asset(filename: &Path, parsed: ParsedWave) -> anyhow::Result<AudioAsset> {
    let name = filename
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    AudioAsset::from_parsed(name, parsed).context("cannot derive audio metadata")
}

fn record_lines(asset: &AudioAsset) -> anyhow::Result<[String; 2]> {
    Ok([
        asset.header_json().context("cannot render header")?,
        asset.format_json().context("cannot render format")?,
    ])
}

fn format_tag_name(tag: u16) -> &'static str {
    match tag {
        WAVE_FORMAT_PCM => "PCM",
        WAVE_FORMAT_IEEE_FLOAT => "IEEE float",
        WAVE_FORMAT_EXTENSIBLE => "extensible",
        _ => "not one we know by name",
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use wavestash_library::AudioAsset;
    use wavestash_riff::parse_wave;

    use super::record_lines;

    #[test]
    fn record_is_header_then_format() {
        let mut bytes = vec![];
        bytes.extend_from_slice(b"RIFF\x24\x00\x00\x00WAVEfmt \x10\x00\x00\x00");
        for field in [1u16, 2] {
            bytes.extend_from_slice(&field.to_le_bytes());
        }
        bytes.extend_from_slice(&44100u32.to_le_bytes());
        bytes.extend_from_slice(&176400u32.to_le_bytes());
        bytes.extend_from_slice(&4u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data\x00\x00\x00\x00");

        let parsed = parse_wave(Cursor::new(bytes)).unwrap();
        let asset = AudioAsset::from_parsed("beep.wav", parsed).unwrap();
        let [header, format] = record_lines(&asset).unwrap();
        assert_eq!(header, r#"{"chunk_id":"RIFF","chunk_size":36,"wave_id":"WAVE"}"#);
        let format: serde_json::Value = serde_json::from_str(&format).unwrap();
        assert_eq!(format["channels"], 2);
        assert_eq!(format["bits_per_sample"], 16);
        assert_eq!(format["subformat"], serde_json::Value::Null);
    }
}
