//! What to combine, and how it should look.

use super::StyleConfig;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A song number as typed, e.g. `"42"` or `"007"`.
///
/// Kept as the digit string so it is matched against file names literally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SongIdentifier(String);

impl SongIdentifier {
    /// Returns `None` unless `digits` is a non-empty run of ASCII digits.
    pub fn new(digits: &str) -> Option<Self> {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(digits.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Start of every library file name holding this song: the number and a space.
    pub fn file_prefix(&self) -> String {
        format!("{} ", self.0)
    }
}

impl fmt::Display for SongIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split a comma-separated song list, dropping anything that is not a number.
///
/// # Examples
///
/// ```rust
/// use songdeck::songs::parse_song_list;
///
/// let ids = parse_song_list("2, 3, x, 5,,");
/// let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
/// assert_eq!(ids, ["2", "3", "5"]);
/// ```
pub fn parse_song_list(input: &str) -> Vec<SongIdentifier> {
    input
        .split(',')
        .filter_map(|token| SongIdentifier::new(token.trim()))
        .collect()
}

/// Everything one run needs. Built once by the caller and only read afterwards.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub songs: Vec<SongIdentifier>,
    pub style: StyleConfig,
    /// Directory of `"<id> <title>.pptx"` decks
    pub library: PathBuf,
}

impl RunRequest {
    pub fn new(songs: Vec<SongIdentifier>, style: StyleConfig, library: impl Into<PathBuf>) -> Self {
        Self {
            songs,
            style,
            library: library.into(),
        }
    }
}
