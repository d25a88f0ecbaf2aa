//! Pulling lyric lines out of source decks.

use crate::ooxml::pptx::{Package, Slide};
use crate::ooxml::Result;
use std::path::Path;

/// Trimmed, non-empty lines of one source slide in shape then paragraph order.
pub type ExtractedLines = Vec<String>;

/// Lines of a single slide.
///
/// Line breaks inside a paragraph count as whitespace, so a paragraph made
/// only of breaks disappears with the empty ones.
pub fn extract_lines(slide: &Slide<'_>) -> Result<ExtractedLines> {
    Ok(slide
        .paragraphs()?
        .into_iter()
        .flatten()
        .filter_map(|para| {
            let trimmed = para.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect())
}

/// Lines of every slide of a deck, one entry per slide in presentation order.
pub fn read_song_deck(path: &Path) -> Result<Vec<ExtractedLines>> {
    let package = Package::open(path)?;
    let presentation = package.presentation()?;
    presentation
        .slides()?
        .iter()
        .map(extract_lines)
        .collect()
}
