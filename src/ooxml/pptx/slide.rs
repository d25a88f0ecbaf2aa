/// Slide objects of a presentation opened for reading.
use crate::ooxml::error::Result;
use crate::ooxml::pptx::parts::SlidePart;

/// A slide in a presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use songdeck::ooxml::pptx::Package;
///
/// let pkg = Package::open("songs/7 It Is Well.pptx")?;
/// let pres = pkg.presentation()?;
///
/// for slide in pres.slides()?.iter() {
///     for shape in slide.paragraphs()? {
///         println!("{}", shape.join(" / "));
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Slide<'a> {
    /// The underlying slide part
    part: SlidePart<'a>,
}

impl<'a> Slide<'a> {
    #[inline]
    pub(crate) fn new(part: SlidePart<'a>) -> Self {
        Self { part }
    }

    /// Paragraph texts grouped per top-level text-bearing shape.
    ///
    /// See [`SlidePart::paragraphs`] for what counts as a paragraph.
    pub fn paragraphs(&self) -> Result<Vec<Vec<String>>> {
        self.part.paragraphs()
    }

    /// Extract all text content from the slide.
    pub fn text(&self) -> Result<String> {
        self.part.extract_text()
    }

    /// Get access to the underlying slide part.
    #[inline]
    pub fn part(&self) -> &SlidePart<'a> {
        &self.part
    }
}
