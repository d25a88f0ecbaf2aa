//! Mutable presentation writer components for PPTX.

pub mod pres;
pub(crate) mod relmap;
pub mod shape;
pub mod slide;

pub use pres::MutablePresentation;
pub use shape::{MutableShape, Rect};
pub use slide::MutableSlide;
