use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use huff::{BitReader, BitWriter, Config, HuffProcessor, Verbosity};
use tracing::info;

/// Compress and decompress files with Huffman codes.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Compress INPUT, writing INPUT.hf unless -o is given
    Compress(Paths),

    /// Decompress INPUT, stripping .hf (or appending .uhf) unless -o is given
    Decompress(Paths),
}

#[derive(clap::Args)]
struct Paths {
    input: PathBuf,

    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log the code for every symbol
    #[arg(short, long)]
    verbose: bool,
}

impl Paths {
    fn processor(&self) -> HuffProcessor {
        let verbosity = if self.verbose {
            Verbosity::Encodings
        } else {
            Verbosity::Quiet
        };
        HuffProcessor::new(Config::new().with_verbosity(verbosity))
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

fn decompressed_name(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == "hf" => path.with_extension(""),
        _ => with_suffix(path, ".uhf"),
    }
}

type FileSource = BitReader<BufReader<File>>;
type FileSink = BitWriter<BufWriter<File>>;

fn open(input: &Path, output: &Path) -> anyhow::Result<(FileSource, FileSink)> {
    let source = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let sink = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    Ok((
        BitReader::new(BufReader::new(source)),
        BitWriter::new(BufWriter::new(sink)),
    ))
}

fn size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match Args::parse().mode {
        Mode::Compress(paths) => {
            let output = paths
                .output
                .clone()
                .unwrap_or_else(|| with_suffix(&paths.input, ".hf"));
            let (source, sink) = open(&paths.input, &output)?;
            paths
                .processor()
                .compress(source, sink)
                .with_context(|| format!("compressing {}", paths.input.display()))?;
            info!(
                input = %paths.input.display(),
                output = %output.display(),
                bytes_in = size(&paths.input),
                bytes_out = size(&output),
                "compressed"
            );
        }
        Mode::Decompress(paths) => {
            let output = paths
                .output
                .clone()
                .unwrap_or_else(|| decompressed_name(&paths.input));
            let (source, sink) = open(&paths.input, &output)?;
            paths
                .processor()
                .decompress(source, sink)
                .with_context(|| format!("decompressing {}", paths.input.display()))?;
            info!(
                input = %paths.input.display(),
                output = %output.display(),
                bytes_in = size(&paths.input),
                bytes_out = size(&output),
                "decompressed"
            );
        }
    }
    Ok(())
}
