/// Parts for PowerPoint presentation documents.
///
/// Thin wrappers over OPC parts that know how to read PresentationML.
pub mod presentation;
pub mod slide;

pub use presentation::PresentationPart;
pub use slide::{LINE_BREAK, SlidePart};
