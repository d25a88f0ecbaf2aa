//! Combining per-song decks into one slideshow.
//!
//! A run takes an ordered list of song numbers and a library directory of
//! `"<number> <title>.pptx"` decks. Each source slide's text is re-paginated
//! into slides of at most [`LINES_PER_SLIDE`] body lines, with the slide's
//! last line repeated as a footer. Every song is followed by a blank
//! separator slide.
//!
//! ```no_run
//! use songdeck::songs::{assemble, parse_song_list, HexColor, RunRequest, StyleConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let style = StyleConfig::new("#FFFF00".parse::<HexColor>()?, HexColor::BLACK)
//!     .with_logo(std::fs::read("logo.png")?)?;
//! let request = RunRequest::new(parse_song_list("3, 14, 15"), style, "songs");
//!
//! let (bytes, report) = assemble(&request)?;
//! std::fs::write(songdeck::songs::DEFAULT_OUTPUT_NAME, bytes)?;
//! println!("{} slides", report.total_slides);
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod color;
pub mod compose;
pub mod error;
pub mod extract;
pub mod locator;
pub mod paginate;
pub mod request;
pub mod style;

pub use assemble::{assemble, build_deck, AssemblyReport, SongOutcome, SongReport};
pub use color::HexColor;
pub use compose::{compose_page, compose_separator};
pub use error::CombineError;
pub use extract::{extract_lines, read_song_deck, ExtractedLines};
pub use locator::SongLibrary;
pub use paginate::{paginate, Page};
pub use request::{parse_song_list, RunRequest, SongIdentifier};
pub use style::{
    Logo, SlideGeometry, StyleConfig, BODY_FONT_SIZE, DEFAULT_OUTPUT_NAME, FONT_FACE, FOOTER_FONT_SIZE,
    LINES_PER_SLIDE,
};

/// Result type for song combining.
pub type Result<T> = std::result::Result<T, CombineError>;
