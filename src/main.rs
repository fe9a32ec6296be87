//! Catechism main entry point
//!
//! This is the command-line interface for reading the Catechism of the
//! Catholic Church from a locally cached copy of the published pages.

use anyhow::{bail, Context};
use catechism::catechism::CatechismIndex;
use catechism::config::{load_or_default, Config};
use catechism::crawler::crawl;
use catechism::output::{print_statistics, write_index, write_paragraph};
use catechism::state::ReadingPosition;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Catechism: read the catechism one paragraph at a time
///
/// Walks the published pages once, caching every page on disk, and prints
/// paragraphs by number. Later runs read entirely from the cache.
#[derive(Parser, Debug)]
#[command(name = "catechism")]
#[command(version)]
#[command(about = "Read the Catechism of the Catholic Church from the terminal", long_about = None)]
struct Cli {
    /// Paragraph number, `begin`, or `next`; omit to print every paragraph
    #[arg(value_name = "N|begin|next")]
    target: Option<Target>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for cached pages (overrides the configuration)
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print crawl statistics to stderr
    #[arg(long)]
    stats: bool,
}

/// What to print after the index is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Paragraph(u32),
    Begin,
    Next,
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "begin" => Ok(Self::Begin),
            "next" => Ok(Self::Next),
            other => other.parse::<u32>().map(Self::Paragraph).map_err(|_| {
                format!(
                    "'{}' is not a paragraph number, 'begin' or 'next'",
                    other
                )
            }),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid default configuration".to_string(),
    })?;

    if let Some(dir) = &cli.cache_dir {
        config.cache.directory = dir.to_string_lossy().into_owned();
    }

    tracing::debug!(
        "Reading from {}{} into {}",
        config.source.base_url,
        config.source.archive_root,
        config.cache.directory
    );

    let report = crawl(&config)
        .await
        .context("Failed to build the catechism index")?;

    if cli.stats {
        print_statistics(&report.stats);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.target {
        None => write_index(&mut out, &report.index)?,
        Some(Target::Paragraph(number)) => handle_lookup(&mut out, &report.index, number)?,
        Some(Target::Begin) => handle_begin(&mut out, &config, &report.index)?,
        Some(Target::Next) => handle_next(&mut out, &config, &report.index)?,
    }

    out.flush()?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only paragraph text.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catechism=info,warn"),
            1 => EnvFilter::new("catechism=debug,info"),
            2 => EnvFilter::new("catechism=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints one paragraph; a missing number prints an empty line
fn handle_lookup<W: Write>(
    out: &mut W,
    index: &CatechismIndex,
    number: u32,
) -> anyhow::Result<()> {
    let paragraph = index.lookup(number);
    if paragraph.is_none() {
        tracing::warn!("Paragraph {} not found", number);
    }
    write_paragraph(out, paragraph)?;
    Ok(())
}

/// Resets the reading position to the first paragraph and prints it
fn handle_begin<W: Write>(
    out: &mut W,
    config: &Config,
    index: &CatechismIndex,
) -> anyhow::Result<()> {
    let path = ReadingPosition::resolve_path(&config.position)?;

    let Some(position) = ReadingPosition::begin(index) else {
        bail!("The index is empty; nothing to read");
    };

    position
        .save(&path)
        .with_context(|| format!("Failed to save reading position to {}", path.display()))?;
    tracing::debug!("Reading position set to {}", position.paragraph);

    write_paragraph(out, index.lookup(position.paragraph))?;
    Ok(())
}

/// Advances the reading position and prints the new paragraph
fn handle_next<W: Write>(
    out: &mut W,
    config: &Config,
    index: &CatechismIndex,
) -> anyhow::Result<()> {
    let path = ReadingPosition::resolve_path(&config.position)?;

    let current = ReadingPosition::load(&path)
        .with_context(|| format!("Failed to load reading position from {}", path.display()))?;

    let Some(current) = current else {
        tracing::info!("No saved reading position, starting from the beginning");
        return handle_begin(out, config, index);
    };

    let Some(next) = current.advance(index) else {
        bail!(
            "Reached the end of the catechism at paragraph {}",
            current.paragraph
        );
    };

    next.save(&path)
        .with_context(|| format!("Failed to save reading position to {}", path.display()))?;
    tracing::debug!(
        "Reading position moved from {} to {}",
        current.paragraph,
        next.paragraph
    );

    write_paragraph(out, index.lookup(next.paragraph))?;
    Ok(())
}
