//! Command-line front end.
//!
//! Reads one document from stdin, a file or a URL, or a whole directory in
//! batch mode, and writes the extraction in the requested format.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use rs_textract::{DuplicateCache, Extractor, Options, OutputFormat};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "textract")]
#[command(version, about = "Extract main text and comments from web pages", long_about = None)]
struct Cli {
    /// Input file (reads stdin when neither a file, a URL nor a directory is given)
    input: Option<PathBuf>,

    /// Fetch the page from this URL
    #[arg(short, long, conflicts_with_all = ["input", "input_dir"])]
    url: Option<String>,

    /// Process every file of this directory
    #[arg(long, conflicts_with = "input")]
    input_dir: Option<PathBuf>,

    /// Write one output file per input here (batch mode)
    #[arg(long, requires = "input_dir")]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    output_format: Option<Format>,

    /// Skip the fallback classifier
    #[arg(long)]
    fast: bool,

    /// Leave comments out of the output
    #[arg(long)]
    no_comments: bool,

    /// Prune teasers and related-content boxes more aggressively
    #[arg(long)]
    precision: bool,

    /// Only keep documents in this language (ISO 639-1)
    #[arg(long)]
    target_language: Option<String>,

    /// JSON file with extraction options
    #[arg(long)]
    config_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Txt,
    Xml,
    Xmltei,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Txt => Self::Txt,
            Format::Xml => Self::Xml,
            Format::Xmltei => Self::XmlTei,
            Format::Json => Self::Json,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn build_options(cli: &Cli) -> Result<Options> {
    let mut options = match &cli.config_file {
        Some(path) => Options::from_json_file(path)?,
        None => Options::default(),
    };
    if let Some(format) = cli.output_format {
        options.output_format = format.into();
    }
    if cli.fast {
        options.no_fallback = true;
    }
    if cli.no_comments {
        options.include_comments = false;
    }
    if cli.precision {
        options.favor_precision = true;
    }
    if let Some(language) = &cli.target_language {
        options.target_language = Some(language.clone());
    }
    Ok(options)
}

/// Download a page, refusing non-2xx answers and oversized bodies.
fn fetch(address: &str, max_size: usize) -> Result<(Vec<u8>, Option<String>)> {
    let url = Url::parse(address).with_context(|| format!("invalid URL: {address}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("unsupported URL scheme: {}", url.scheme());
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("textract/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let response = client
        .get(url.as_str())
        .send()
        .with_context(|| format!("fetching {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("fetching {url}: HTTP {status}");
    }
    if response
        .content_length()
        .is_some_and(|len| len > max_size as u64)
    {
        bail!("fetching {url}: response larger than {max_size} bytes");
    }
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().with_context(|| format!("reading {url}"))?;
    if body.len() > max_size {
        bail!("fetching {url}: response larger than {max_size} bytes");
    }
    Ok((body.to_vec(), content_type))
}

fn extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Txt => "txt",
        OutputFormat::Xml | OutputFormat::XmlTei => "xml",
        OutputFormat::Json => "json",
    }
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Process every file of `dir` in parallel with one shared duplicate cache.
fn run_batch(options: Options, dir: &Path, output_dir: Option<&Path>) -> Result<()> {
    let files = list_files(dir)?;
    if let Some(out) = output_dir {
        fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    }
    let format = options.output_format;
    let cache = Arc::new(DuplicateCache::from_options(&options));
    let extractor = Extractor::with_cache(options, cache);

    let outcomes: Vec<bool> = files
        .par_iter()
        .map(|path| {
            let record_id = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "unreadable file");
                    return false;
                }
            };
            let output = match extractor.process_bytes(&bytes, None, Some(record_id)) {
                Ok(Some(output)) => output,
                Ok(None) => return false,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "extraction failed");
                    return false;
                }
            };
            let written = match output_dir {
                Some(out) => {
                    let target = out.join(format!("{record_id}.{}", extension(format)));
                    fs::write(&target, output)
                }
                None => writeln!(io::stdout().lock(), "{output}"),
            };
            if let Err(err) = written {
                warn!(path = %path.display(), error = %err, "could not write output");
                return false;
            }
            true
        })
        .collect();

    let processed = outcomes.iter().filter(|ok| **ok).count();
    let skipped = outcomes.len() - processed;
    info!(processed, skipped, "batch finished");
    eprintln!("{processed} processed, {skipped} skipped");
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let options = build_options(cli)?;

    if let Some(dir) = &cli.input_dir {
        return run_batch(options, dir, cli.output_dir.as_deref());
    }

    let (bytes, content_type, record_id) = match (&cli.url, &cli.input) {
        (Some(url), _) => {
            let (bytes, content_type) = fetch(url, options.max_file_size)?;
            (bytes, content_type, Some(url.clone()))
        }
        (None, Some(path)) => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            (bytes, None, Some(path.display().to_string()))
        }
        (None, None) => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes).context("reading stdin")?;
            (bytes, None, None)
        }
    };

    let extractor = Extractor::new(options);
    match extractor.process_bytes(&bytes, content_type.as_deref(), record_id.as_deref())? {
        Some(output) => {
            println!("{output}");
            Ok(())
        }
        None => bail!("no usable content"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
