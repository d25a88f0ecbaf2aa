//! Driving a whole run: locate, extract, paginate, compose, serialize.

use super::{
    compose_page, compose_separator, paginate, read_song_deck, Result, RunRequest, SlideGeometry,
    SongIdentifier, SongLibrary,
};
use crate::ooxml::pptx::MutablePresentation;
use serde::Serialize;
use tracing::{debug, info, warn};

/// What happened to one requested song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum SongOutcome {
    /// Added to the deck, followed by a separator
    Combined {
        file: String,
        source_slides: usize,
        content_slides: usize,
    },
    /// No library file starts with `"<id> "`
    NotFound,
    /// A file matched but could not be read as a presentation
    Unreadable { file: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongReport {
    pub id: SongIdentifier,
    #[serde(flatten)]
    pub outcome: SongOutcome,
}

impl SongReport {
    pub fn resolved(&self) -> bool {
        matches!(self.outcome, SongOutcome::Combined { .. })
    }
}

/// Summary of a run, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyReport {
    pub songs: Vec<SongReport>,
    /// Content and separator slides in the output
    pub total_slides: usize,
}

impl AssemblyReport {
    /// Songs that made it into the deck.
    pub fn combined(&self) -> usize {
        self.songs.iter().filter(|s| s.resolved()).count()
    }
}

/// Build the combined deck and serialize it.
///
/// # Errors
///
/// Fails before touching any song when the library directory is missing or
/// cannot be listed, and after composing if the deck cannot be written. Songs
/// that cannot be found or read are skipped and reported.
///
/// # Examples
///
/// ```no_run
/// use songdeck::songs::{assemble, parse_song_list, RunRequest, StyleConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = RunRequest::new(parse_song_list("12, 7"), StyleConfig::default(), "songs");
/// let (bytes, report) = assemble(&request)?;
/// std::fs::write("combined_songs.pptx", bytes)?;
/// println!("{} of {} songs combined", report.combined(), report.songs.len());
/// # Ok(())
/// # }
/// ```
pub fn assemble(request: &RunRequest) -> Result<(Vec<u8>, AssemblyReport)> {
    let (deck, report) = build_deck(request)?;
    let bytes = deck.to_bytes()?;
    info!(
        slides = report.total_slides,
        bytes = bytes.len(),
        "Wrote combined deck"
    );
    Ok((bytes, report))
}

/// Compose the deck without serializing it.
pub fn build_deck(request: &RunRequest) -> Result<(MutablePresentation, AssemblyReport)> {
    let library = SongLibrary::open(&request.library)?;
    let geometry = SlideGeometry::widescreen();
    let mut deck = MutablePresentation::with_size(geometry.width, geometry.height);

    info!(
        songs = request.songs.len(),
        library = %library.root().display(),
        "Combining songs"
    );

    let mut report = AssemblyReport::default();
    for id in &request.songs {
        let outcome = add_song(&mut deck, &library, id, request, &geometry)?;
        report.songs.push(SongReport {
            id: id.clone(),
            outcome,
        });
    }
    report.total_slides = deck.slide_count();

    Ok((deck, report))
}

fn add_song(
    deck: &mut MutablePresentation,
    library: &SongLibrary,
    id: &SongIdentifier,
    request: &RunRequest,
    geometry: &SlideGeometry,
) -> Result<SongOutcome> {
    let Some(path) = library.locate(id) else {
        return Ok(SongOutcome::NotFound);
    };
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let source = match read_song_deck(path) {
        Ok(source) => source,
        Err(e) => {
            warn!(song = %id, file = %file, error = %e, "Skipping unreadable song deck");
            return Ok(SongOutcome::Unreadable {
                file,
                reason: e.to_string(),
            });
        }
    };

    let mut content_slides = 0;
    for (index, lines) in source.iter().enumerate() {
        let pages = paginate(lines);
        debug!(
            song = %id,
            slide = index + 1,
            lines = lines.len(),
            pages = pages.len(),
            "Paginated source slide"
        );
        for page in &pages {
            compose_page(deck, page, &request.style, geometry)?;
        }
        content_slides += pages.len();
    }
    compose_separator(deck, &request.style, geometry)?;

    info!(song = %id, file = %file, slides = content_slides, "Added song");
    Ok(SongOutcome::Combined {
        file,
        source_slides: source.len(),
        content_slides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::songs::{parse_song_list, CombineError, StyleConfig};
    use std::fs;
    use tempfile::TempDir;

    fn write_song(dir: &TempDir, name: &str, slides: &[&[&str]]) {
        let mut pres = MutablePresentation::widescreen();
        for lines in slides {
            let slide = pres.add_slide();
            if !lines.is_empty() {
                slide.add_paragraphs_box(lines.iter().copied(), 0, 0, 100, 100);
            }
        }
        pres.save(dir.path().join(name)).unwrap();
    }

    fn request(dir: &TempDir, songs: &str) -> RunRequest {
        RunRequest::new(parse_song_list(songs), StyleConfig::default(), dir.path())
    }

    #[test]
    fn test_missing_library_is_fatal() {
        let dir = TempDir::new().unwrap();
        let request = RunRequest::new(
            parse_song_list("1"),
            StyleConfig::default(),
            dir.path().join("missing"),
        );
        assert!(matches!(
            assemble(&request),
            Err(CombineError::LibraryMissing { .. })
        ));
    }

    #[test]
    fn test_separator_after_each_song() {
        let dir = TempDir::new().unwrap();
        write_song(&dir, "1 First.pptx", &[&["a", "b", "(c) One"]]);
        write_song(&dir, "2 Second.pptx", &[&["solo"], &["x", "y"]]);

        let (deck, report) = build_deck(&request(&dir, "1, 2")).unwrap();

        // song 1: one page + separator; song 2: two pages + separator
        assert_eq!(deck.slide_count(), 5);
        assert_eq!(report.total_slides, 5);
        let shape_counts: Vec<usize> = deck.slides().iter().map(|s| s.shape_count()).collect();
        assert_eq!(shape_counts, [2, 0, 2, 2, 0]);

        assert_eq!(
            report.songs[1].outcome,
            SongOutcome::Combined {
                file: "2 Second.pptx".into(),
                source_slides: 2,
                content_slides: 2,
            }
        );
    }

    #[test]
    fn test_unmatched_and_empty() {
        let dir = TempDir::new().unwrap();
        write_song(&dir, "3 Blank.pptx", &[&[], &["", "  "]]);

        let (deck, report) = build_deck(&request(&dir, "9, 3")).unwrap();

        // unmatched adds nothing, an empty song still ends with a separator
        assert_eq!(deck.slide_count(), 1);
        assert_eq!(report.songs[0].outcome, SongOutcome::NotFound);
        assert!(report.songs[1].resolved());
        assert_eq!(report.combined(), 1);
    }

    #[test]
    fn test_corrupt_deck_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("4 Broken.pptx"), b"not a zip").unwrap();
        write_song(&dir, "5 Fine.pptx", &[&["line"]]);

        let (bytes, report) = assemble(&request(&dir, "4,5")).unwrap();
        assert!(!bytes.is_empty());
        assert!(matches!(
            report.songs[0].outcome,
            SongOutcome::Unreadable { ref file, .. } if file == "4 Broken.pptx"
        ));
        assert_eq!(report.total_slides, 2);
    }

    #[test]
    fn test_duplicates_resolved_each_time() {
        let dir = TempDir::new().unwrap();
        write_song(&dir, "6 Again.pptx", &[&["la"]]);

        let (deck, report) = build_deck(&request(&dir, "6,6")).unwrap();
        assert_eq!(deck.slide_count(), 4);
        assert_eq!(report.combined(), 2);
    }

    #[test]
    fn test_report_json_shape() {
        let report = AssemblyReport {
            songs: vec![
                SongReport {
                    id: SongIdentifier::new("1").unwrap(),
                    outcome: SongOutcome::NotFound,
                },
                SongReport {
                    id: SongIdentifier::new("2").unwrap(),
                    outcome: SongOutcome::Combined {
                        file: "2 Two.pptx".into(),
                        source_slides: 1,
                        content_slides: 1,
                    },
                },
            ],
            total_slides: 2,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "songs": [
                    { "id": "1", "status": "not_found" },
                    {
                        "id": "2",
                        "status": "combined",
                        "file": "2 Two.pptx",
                        "source_slides": 1,
                        "content_slides": 1
                    }
                ],
                "total_slides": 2
            })
        );
        assert_eq!(report.combined(), 1);
    }
}
