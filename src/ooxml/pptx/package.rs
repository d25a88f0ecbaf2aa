/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::pptx::parts::PresentationPart;
use crate::ooxml::pptx::presentation::Presentation;
use std::path::Path;

/// A PowerPoint (.pptx) package.
///
/// This is the main entry point for reading presentations. It wraps an OPC
/// package whose main part has been checked to be a presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use songdeck::ooxml::pptx::Package;
///
/// let pkg = Package::open("songs/3 How Great Thou Art.pptx")?;
/// let pres = pkg.presentation()?;
/// println!("Presentation has {} slides", pres.slide_count()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
}

impl Package {
    /// Open a .pptx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Read a .pptx package from its ZIP bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_part = opc
            .main_document_part()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        // Macro-enabled decks carry the same presentation markup
        let content_type = main_part.content_type();
        if content_type != ct::PML_PRESENTATION_MAIN && content_type != ct::PML_PRES_MACRO_MAIN {
            return Err(OoxmlError::InvalidContentType {
                expected: format!(
                    "{} or {}",
                    ct::PML_PRESENTATION_MAIN,
                    ct::PML_PRES_MACRO_MAIN
                ),
                got: content_type.to_string(),
            });
        }

        Ok(Self { opc })
    }

    /// Get the main presentation.
    pub fn presentation(&self) -> Result<Presentation<'_>> {
        let main_part = self.opc.main_document_part()?;
        Ok(Presentation::new(PresentationPart::from_part(main_part), &self.opc))
    }

    /// Get the underlying OPC package.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type;
    use crate::ooxml::opc::{PackURI, PackageWriter, XmlPart};

    #[test]
    fn test_rejects_non_presentation() {
        let mut opc = OpcPackage::new();
        let partname = PackURI::new("/word/document.xml").unwrap();
        opc.add_part(Box::new(XmlPart::new(
            partname.clone(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"
                .to_string(),
            b"<w:document/>".to_vec(),
        )));
        opc.relate_to(&partname, relationship_type::OFFICE_DOCUMENT);
        let bytes = PackageWriter::to_bytes(&opc).unwrap();

        let result = Package::from_bytes(&bytes);
        assert!(matches!(result, Err(OoxmlError::InvalidContentType { .. })));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Package::from_bytes(b"not a zip archive").is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = Package::open("/nonexistent/deck.pptx");
        assert!(matches!(result, Err(OoxmlError::Opc(_))));
    }
}
