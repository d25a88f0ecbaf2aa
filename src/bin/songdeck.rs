//! CLI binary for songdeck.
//!
//! A thin shim over the library crate that maps flags to a `RunRequest`,
//! writes the combined deck and prints what happened to each song.

use anyhow::{Context, Result};
use clap::Parser;
use songdeck::songs::{
    assemble, parse_song_list, AssemblyReport, HexColor, RunRequest, SongOutcome, StyleConfig,
    DEFAULT_OUTPUT_NAME,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r##"EXAMPLES:
  # Songs 12, 7 and 40 from ./songs into combined_songs.pptx
  songdeck "12, 7, 40"

  # Yellow text on dark blue with a logo
  songdeck "3,5" --font-color "#FFFF00" --bg-color "#000033" --logo church.png

  # Another library and output, with a JSON report on stdout
  songdeck "1,2" --library ~/lyrics --output sunday.pptx --json

ENVIRONMENT:
  Every option can also be set through its SONGDECK_* variable.
  RUST_LOG overrides the log level chosen by --verbose / --quiet.
"##;

#[derive(Parser, Debug)]
#[command(
    name = "songdeck",
    version,
    about = "Combine per-song PowerPoint decks into one slideshow",
    long_about = "Combine per-song PowerPoint decks into one slideshow. Each song's text is \
re-paginated into slides of at most eight lines with a repeated footer, styled uniformly, \
and followed by a blank separator slide.",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Comma-separated song numbers, e.g. "12, 7, 40". Non-numbers are ignored.
    songs: String,

    /// Directory of "<number> <title>.pptx" song decks.
    #[arg(short, long, env = "SONGDECK_LIBRARY", default_value = "songs")]
    library: PathBuf,

    /// Text color as #RRGGBB.
    #[arg(long, env = "SONGDECK_FONT_COLOR", default_value = "#FFFFFF")]
    font_color: HexColor,

    /// Background color as #RRGGBB.
    #[arg(long, env = "SONGDECK_BG_COLOR", default_value = "#000000")]
    bg_color: HexColor,

    /// Picture stretched over every slide.
    #[arg(long, env = "SONGDECK_BG_IMAGE")]
    bg_image: Option<PathBuf>,

    /// Picture shown in the bottom-left corner of content slides.
    #[arg(long, env = "SONGDECK_LOGO")]
    logo: Option<PathBuf>,

    /// Where to write the combined deck.
    #[arg(short, long, env = "SONGDECK_OUTPUT", default_value = DEFAULT_OUTPUT_NAME)]
    output: PathBuf,

    /// Print the run report as JSON on stdout.
    #[arg(long, env = "SONGDECK_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SONGDECK_VERBOSE")]
    verbose: bool,

    /// Suppress all output except warnings and errors.
    #[arg(short, long, env = "SONGDECK_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Request ──────────────────────────────────────────────────────────
    let mut style = StyleConfig::new(cli.font_color, cli.bg_color);
    if let Some(path) = &cli.bg_image {
        style = style
            .with_background_image(read_image(path)?)
            .with_context(|| format!("Cannot use background image {}", path.display()))?;
    }
    if let Some(path) = &cli.logo {
        style = style
            .with_logo(read_image(path)?)
            .with_context(|| format!("Cannot use logo {}", path.display()))?;
    }

    let songs = parse_song_list(&cli.songs);
    if songs.is_empty() {
        anyhow::bail!("No song numbers found in {:?}", cli.songs);
    }
    let request = RunRequest::new(songs, style, &cli.library);

    // ── Run ──────────────────────────────────────────────────────────────
    let (bytes, report) = assemble(&request).context("Failed to combine songs")?;
    fs::write(&cli.output, &bytes)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else if !cli.quiet {
        print_summary(&report, &cli.output);
    }

    Ok(())
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_summary(report: &AssemblyReport, output: &Path) {
    for song in &report.songs {
        match &song.outcome {
            SongOutcome::Combined {
                file,
                content_slides,
                ..
            } => eprintln!("  ✓ {:>4}  {file}  ({content_slides} slides)", song.id),
            SongOutcome::NotFound => eprintln!("  - {:>4}  not found", song.id),
            SongOutcome::Unreadable { file, reason } => {
                eprintln!("  ✗ {:>4}  {file}: {reason}", song.id)
            }
        }
    }
    eprintln!(
        "{} of {} songs, {} slides written to {}",
        report.combined(),
        report.songs.len(),
        report.total_slides,
        output.display()
    );
}
