//! Errors raised while combining song decks.
//!
//! Only a handful of conditions stop a run. A song that cannot be found, or
//! whose deck cannot be read, is skipped and recorded in the
//! [`AssemblyReport`](super::AssemblyReport) instead of surfacing here.

use crate::ooxml::OoxmlError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CombineError {
    // ── Fatal: library ────────────────────────────────────────────────────
    /// The song library directory does not exist or is not a directory.
    #[error("Song library not found: {path:?}")]
    LibraryMissing { path: PathBuf },

    /// The library exists but its entries could not be listed.
    #[error("Cannot read song library {path:?}: {source}")]
    LibraryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ── Caller input ──────────────────────────────────────────────────────
    /// A color that is not `#RRGGBB`.
    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    /// Image bytes in a format that cannot be embedded.
    #[error("Unsupported {0} format: expected PNG, JPEG, GIF, BMP or TIFF")]
    UnsupportedImage(&'static str),

    /// A recognised image whose header cannot be decoded.
    #[error("Cannot read {what} dimensions: {source}")]
    ImageDimensions {
        what: &'static str,
        #[source]
        source: image::ImageError,
    },

    // ── Output ────────────────────────────────────────────────────────────
    #[error("Failed to build output deck: {0}")]
    Ooxml(#[from] OoxmlError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = CombineError::LibraryMissing {
            path: PathBuf::from("songs"),
        };
        assert_eq!(err.to_string(), "Song library not found: \"songs\"");

        let err = CombineError::InvalidColor("red".into());
        assert!(err.to_string().contains("'red'"));

        let err = CombineError::UnsupportedImage("logo");
        assert!(err.to_string().starts_with("Unsupported logo format"));
    }

    #[test]
    fn test_unreadable_keeps_source() {
        use std::error::Error as _;
        let err = CombineError::LibraryUnreadable {
            path: PathBuf::from("songs"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }
}
