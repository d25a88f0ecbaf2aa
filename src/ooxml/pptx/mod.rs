//! PowerPoint (.pptx) presentation support.
//!
//! Reading goes through [`Package`] → [`Presentation`] → [`Slide`], which
//! exposes slide text paragraph by paragraph. Writing goes through
//! [`MutablePresentation`], which builds a complete package (master, layout,
//! theme and slides) from scratch.
//!
//! # Example
//!
//! ```rust,no_run
//! use songdeck::ooxml::pptx::{MutablePresentation, Package, SlideBackground};
//!
//! let source = Package::open("songs/5 Holy Holy Holy.pptx")?;
//! let mut out = MutablePresentation::widescreen();
//!
//! for slide in source.presentation()?.slides()? {
//!     let lines: Vec<String> = slide.paragraphs()?.into_iter().flatten().collect();
//!     let new_slide = out.add_slide();
//!     new_slide.set_background(SlideBackground::solid("000000"));
//!     new_slide.add_paragraphs_box(lines, 457200, 914400, 11274552, 5029200);
//! }
//! out.save("copy.pptx")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backgrounds;
pub mod format;
pub mod package;
pub mod parts;
pub mod presentation;
pub mod slide;
pub mod template;
pub mod writer;

pub use backgrounds::SlideBackground;
pub use format::{ImageFormat, ParagraphAlignment, TextFormat, VerticalAnchor};
pub use package::Package;
pub use presentation::Presentation;
pub use slide::Slide;
pub use writer::{MutablePresentation, MutableShape, MutableSlide, Rect};
