use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use wavestash_library::{Library, Query, QueryOption};
use wavestash_riff::ParseOptions;

pub fn list(
    directory: &Path,
    min_duration: Option<f64>,
    max_duration: Option<f64>,
    options: ParseOptions,
) -> anyhow::Result<()> {
    let query = build_query(min_duration, max_duration);
    let mut library = Library::with_options(options);

    info!(?directory, "Loading WAVE files");
    for entry in WalkDir::new(directory) {
        let entry = entry.context("cannot walk directory")?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_wave_file(path) {
            continue;
        }

        let name = path
            .strip_prefix(directory)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();
        let reader = BufReader::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        );
        match library.ingest(&name, reader) {
            Ok(_) => (),
            Err(error) if error.is_client_error() => {
                warn!(%name, %error, "Skipping file");
            }
            Err(error) => {
                return Err(error).with_context(|| format!("cannot load {}", path.display()))
            }
        }
    }
    debug!("Loaded {} files", library.len());

    for info in library.list(&query) {
        println!("{}", serde_json::to_string(&info)?);
    }

    Ok(())
}

fn build_query(min_duration: Option<f64>, max_duration: Option<f64>) -> Query {
    let mut query = Query::new();
    if let Some(min) = min_duration {
        query = query.with(QueryOption::MinDuration(min));
    }
    if let Some(max) = max_duration {
        query = query.with(QueryOption::MaxDuration(max));
    }
    query
}

fn is_wave_file(path: &Path) -> bool {
    path.extension()
        .map(|extension| extension.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}
