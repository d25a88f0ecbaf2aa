//! Open Packaging Conventions (OPC) implementation.
//!
//! The ZIP-based container format underneath every Office Open XML file:
//! parts addressed by partname, typed by `[Content_Types].xml`, and linked by
//! relationships.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart};
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
