mod codec;
mod inspect;
mod list;

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use flate2::Compression;
use inspect::{inspect, Inspect};
use tracing::{error, info, metadata::LevelFilter};
use tracing_subscriber::{prelude::*, EnvFilter};
use wavestash_riff::{ParseOptions, UnknownChunkPolicy};

#[derive(Subcommand)]
enum Command {
    /// Parse a WAVE file and print part of what was found.
    Inspect {
        /// WAVE file to read.
        filename: PathBuf,

        /// Which part to dump into stdout.
        #[clap(subcommand)]
        what: Inspect,
    },

    /// Parse a WAVE file and write the compressed form of everything that was read.
    Compress {
        /// WAVE file to read.
        filename: PathBuf,

        /// Where to write the compressed payload. Defaults to the input path with `.z` appended.
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore a payload written by `compress` to the original bytes.
    Decompress {
        /// Compressed payload to read.
        filename: PathBuf,

        /// Where to write the restored file. Defaults to the input path without its `.z`.
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Load every .wav file under a directory and list the ones matching the filters, one
    /// JSON object per line.
    List {
        /// Directory to search.
        directory: PathBuf,

        /// Only list files strictly longer than this many seconds.
        #[clap(long)]
        min_duration: Option<f64>,

        /// Only list files strictly shorter than this many seconds.
        #[clap(long)]
        max_duration: Option<f64>,
    },
}

#[derive(ClapArgs)]
struct ParserArgs {
    /// Treat an unknown chunk as the end of the interesting part of the file, compressing
    /// the rest without looking at it.
    #[clap(long, global = true)]
    legacy_skip: bool,

    /// zlib compression level, 0-9.
    #[clap(
        long,
        global = true,
        default_value_t = 6,
        value_parser = clap::value_parser!(u32).range(0..=9)
    )]
    level: u32,
}

impl ParserArgs {
    fn options(&self) -> ParseOptions {
        ParseOptions {
            unknown_chunks: if self.legacy_skip {
                UnknownChunkPolicy::ConsumeToEnd
            } else {
                UnknownChunkPolicy::SkipDeclared
            },
            compression: Compression::new(self.level),
        }
    }
}

#[derive(Parser)]
struct Args {
    /// Tool to run.
    #[clap(subcommand)]
    command: Command,

    #[clap(flatten)]
    parser: ParserArgs,
}

fn fallible_main() -> anyhow::Result<()> {
    let args = Args::parse();
    let options = args.parser.options();

    match args.command {
        Command::Inspect { filename, what } => inspect(&filename, what, options)?,
        Command::Compress { filename, output } => {
            codec::compress(&filename, output.as_deref(), options)?
        }
        Command::Decompress { filename, output } => {
            codec::decompress(&filename, output.as_deref())?
        }
        Command::List {
            directory,
            min_duration,
            max_duration,
        } => list::list(&directory, min_duration, max_duration, options)?,
    }

    Ok(())
}

fn main() {
    let subscriber = tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::DEBUG.into())
                .from_env_lossy(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        );
    tracing::subscriber::set_global_default(subscriber)
        .expect("cannot set default tracing subscriber");

    info!("wavestash version {}", env!("CARGO_PKG_VERSION"));

    match fallible_main() {
        Ok(_) => (),
        Err(err) => {
            error!("in fallible_main: {err:?}");
            std::process::exit(1);
        }
    }
}
