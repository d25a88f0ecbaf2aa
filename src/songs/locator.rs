//! Finding a song's deck in the library directory.

use super::{CombineError, Result, SongIdentifier};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A snapshot of the regular files in a song library, sorted by file name.
#[derive(Debug, Clone)]
pub struct SongLibrary {
    root: PathBuf,
    /// (file name, full path), ascending by name
    entries: Vec<(OsString, PathBuf)>,
}

impl SongLibrary {
    /// List the library directory.
    ///
    /// # Errors
    ///
    /// - [`CombineError::LibraryMissing`] if `root` is not a directory
    /// - [`CombineError::LibraryUnreadable`] if it cannot be listed
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(CombineError::LibraryMissing {
                path: root.to_path_buf(),
            });
        }

        let unreadable = |source| CombineError::LibraryUnreadable {
            path: root.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(root).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            entries.push((entry.file_name(), path));
        }
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        debug!(library = %root.display(), files = entries.len(), "Listed song library");
        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first file, by name, starting with `"<id> "`.
    ///
    /// The trailing space bounds the number, so song `2` never picks up
    /// `"20 Title.pptx"`. Only the prefix has to be text; the rest of the
    /// name may be in any encoding.
    pub fn locate(&self, id: &SongIdentifier) -> Option<&Path> {
        let prefix = id.file_prefix();
        let found = self
            .entries
            .iter()
            .find(|(name, _)| name.as_encoded_bytes().starts_with(prefix.as_bytes()))
            .map(|(_, path)| path.as_path());

        match found {
            Some(path) => debug!(song = %id, file = %path.display(), "Located song"),
            None => debug!(song = %id, "No file for song"),
        }
        found
    }
}
