//! Songdeck - combine per-song PowerPoint decks into one slideshow
//!
//! Worship teams and choirs often keep one `.pptx` per song, named
//! `"<number> <title>.pptx"`. This library builds a single evening's deck from a
//! list of song numbers, re-flowing each song's text into evenly sized slides
//! with one look: shared colors, an optional background picture and an
//! optional logo.
//!
//! # Features
//!
//! - **Song combining**: locate, extract, paginate and compose songs in order,
//!   with a separator slide after each one
//! - **PPTX reader**: slides in presentation order and the paragraphs of every
//!   text-bearing shape
//! - **PPTX writer**: 16:9 decks with solid backgrounds, styled multi-paragraph
//!   text boxes and deduplicated pictures
//! - **OPC packaging**: content types, relationships and ZIP I/O
//!
//! # Example - Combining songs
//!
//! ```no_run
//! use songdeck::songs::{assemble, parse_song_list, RunRequest, StyleConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = RunRequest::new(parse_song_list("1, 42, 7"), StyleConfig::default(), "songs");
//! let (bytes, report) = assemble(&request)?;
//! std::fs::write("combined_songs.pptx", bytes)?;
//!
//! for song in &report.songs {
//!     println!("{}: {:?}", song.id, song.outcome);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Reading a PPTX file
//!
//! ```no_run
//! use songdeck::ooxml::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("12 Amazing Grace.pptx")?;
//! let pres = pkg.presentation()?;
//!
//! for slide in pres.slides()? {
//!     println!("{}", slide.text()?);
//! }
//! # Ok(())
//! # }
//! ```

/// Unit conversion and XML text helpers
pub mod common;

/// OOXML (Office Open XML) packaging, plus a PresentationML reader and writer
pub mod ooxml;

/// The song combiner built on top of [`ooxml`]
pub mod songs;

// Re-export commonly used types for convenience
pub use songs::{assemble, AssemblyReport, CombineError, HexColor, RunRequest, StyleConfig};
