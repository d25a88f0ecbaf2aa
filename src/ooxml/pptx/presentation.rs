/// Main presentation object - the high-level read API.
use crate::ooxml::error::Result;
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::pptx::parts::{PresentationPart, SlidePart};
use crate::ooxml::pptx::slide::Slide;

/// A PowerPoint presentation opened for reading.
///
/// Not intended to be constructed directly. Use `Package::presentation()`.
///
/// # Examples
///
/// ```rust,no_run
/// use songdeck::ooxml::pptx::Package;
///
/// let pkg = Package::open("combined_songs.pptx")?;
/// let pres = pkg.presentation()?;
///
/// if let (Some(width), Some(height)) = (pres.slide_width()?, pres.slide_height()?) {
///     println!("Slide size: {}x{} EMUs", width, height);
/// }
///
/// for slide in pres.slides()? {
///     println!("{}", slide.text()?);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Presentation<'a> {
    /// The underlying presentation part
    part: PresentationPart<'a>,
    /// Reference to the OPC package for accessing related parts
    package: &'a OpcPackage,
}

impl<'a> Presentation<'a> {
    #[inline]
    pub(crate) fn new(part: PresentationPart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    /// Number of slides listed in the presentation.
    pub fn slide_count(&self) -> Result<usize> {
        self.part.slide_count()
    }

    /// Slide width in EMUs, or None if the presentation declares no size.
    pub fn slide_width(&self) -> Result<Option<i64>> {
        Ok(self.part.slide_size()?.map(|(cx, _)| cx))
    }

    /// Slide height in EMUs, or None if the presentation declares no size.
    pub fn slide_height(&self) -> Result<Option<i64>> {
        Ok(self.part.slide_size()?.map(|(_, cy)| cy))
    }

    /// All slides in presentation order (the order of `p:sldIdLst`).
    pub fn slides(&self) -> Result<Vec<Slide<'a>>> {
        let slide_rids = self.part.slide_rids()?;
        let mut slides = Vec::with_capacity(slide_rids.len());

        for r_id in slide_rids {
            let related = self.package.related_part(self.part.part(), &r_id)?;
            slides.push(Slide::new(SlidePart::from_part(related)));
        }

        Ok(slides)
    }
}
