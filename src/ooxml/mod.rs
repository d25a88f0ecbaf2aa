//! Office Open XML (OOXML) support, limited to PowerPoint presentations.
//!
//! The module is organized in two layers:
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, parts, relationships)
//! 2. **PresentationML** (`pptx`): reading slide text out of existing decks
//!    and writing new decks from scratch
//!
//! # Example
//!
//! ```rust,no_run
//! use songdeck::ooxml::pptx::Package;
//!
//! let pkg = Package::open("songs/12 Be Thou My Vision.pptx")?;
//! let pres = pkg.presentation()?;
//! for slide in pres.slides()? {
//!     println!("{:?}", slide.paragraphs()?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

pub use error::{OoxmlError, Result};
