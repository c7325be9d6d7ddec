use std::{
    ffi::OsString,
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::{debug, info};
use wavestash_core::sink;
use wavestash_riff::{ParseOptions, WaveParser};

pub fn compress(
    filename: &Path,
    output: Option<&Path>,
    options: ParseOptions,
) -> anyhow::Result<()> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| compressed_path(filename));

    info!(?filename, "Compressing WAVE file");
    let reader = BufReader::new(
        File::open(filename).with_context(|| format!("cannot open {}", filename.display()))?,
    );
    let parsed = WaveParser::with_options(reader, options)
        .parse()
        .with_context(|| format!("cannot parse {}", filename.display()))?;

    debug!(
        "Writing {} compressed bytes to {}",
        parsed.payload.len(),
        output.display()
    );
    fs::write(&output, &parsed.payload)
        .with_context(|| format!("cannot write {}", output.display()))?;
    Ok(())
}

pub fn decompress(filename: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let output = match output {
        Some(output) => output.to_path_buf(),
        None => decompressed_path(filename).with_context(|| {
            format!(
                "{} does not end in .z; pass --output explicitly",
                filename.display()
            )
        })?,
    };

    info!(?filename, "Decompressing payload");
    let payload =
        fs::read(filename).with_context(|| format!("cannot read {}", filename.display()))?;
    let restored = sink::decompress(&payload).context("payload is not a valid zlib stream")?;

    debug!(
        "Writing {} restored bytes to {}",
        restored.len(),
        output.display()
    );
    fs::write(&output, restored).with_context(|| format!("cannot write {}", output.display()))?;
    Ok(())
}

fn compressed_path(filename: &Path) -> PathBuf {
    let mut path = OsString::from(filename.as_os_str());
    path.push(".z");
    PathBuf::from(path)
}

fn decompressed_path(filename: &Path) -> Option<PathBuf> {
    if filename.extension()? == "z" {
        Some(filename.with_extension(""))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{compressed_path, decompressed_path};

    #[test]
    fn default_paths_round_trip() {
        let original = Path::new("audio/beep.wav");
        let compressed = compressed_path(original);
        assert_eq!(compressed, PathBuf::from("audio/beep.wav.z"));
        assert_eq!(decompressed_path(&compressed).as_deref(), Some(original));
    }

    #[test]
    fn other_extensions_need_an_explicit_output() {
        assert_eq!(decompressed_path(Path::new("beep.wav")), None);
        assert_eq!(decompressed_path(Path::new("beep")), None);
    }
}
