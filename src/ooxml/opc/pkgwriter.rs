//! Package writer for OPC packages.
//!
//! Serializes an [`OpcPackage`] into ZIP bytes: `[Content_Types].xml`, the
//! package relationships, then every part followed by its own `.rels`.

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// Package writer that serializes an OPC package to a ZIP archive.
pub struct PackageWriter;

impl PackageWriter {
    /// Write an OPC package to a file.
    pub fn write<P: AsRef<Path>>(path: P, package: &OpcPackage) -> Result<()> {
        let bytes = Self::to_bytes(package)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize an OPC package to bytes.
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let mut phys_writer = PhysPkgWriter::new();

        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        let cti = ContentTypesItem::from_package(package);
        phys_writer.write(&content_types_uri, cti.to_xml()?.as_bytes())?;

        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let pkg_rels_uri = package_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        phys_writer.write(&pkg_rels_uri, package.rels().to_xml().as_bytes())?;

        Self::write_parts(&mut phys_writer, package)?;

        phys_writer.finish()
    }

    fn write_parts(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        for part in package.iter_parts() {
            // Images are already compressed
            if part.content_type().starts_with("image/") {
                phys_writer.write_stored(part.partname(), part.blob())?;
            } else {
                phys_writer.write(part.partname(), part.blob())?;
            }

            if !part.rels().is_empty() {
                let rels_uri = part.partname().rels_uri().map_err(OpcError::InvalidPackUri)?;
                phys_writer.write(&rels_uri, part.rels().to_xml().as_bytes())?;
            }
        }

        Ok(())
    }
}

/// Builder for `[Content_Types].xml`.
///
/// Well-known extension/type pairs become `Default` elements; everything else
/// gets a per-part `Override`.
struct ContentTypesItem {
    defaults: BTreeMap<String, &'static str>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS);
        defaults.insert("xml".to_string(), ct::XML);

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();
        for part in package.iter_parts() {
            cti.add_content_type(part.partname(), part.content_type());
        }
        cti
    }

    fn add_content_type(&mut self, partname: &PackURI, content_type: &str) {
        let ext = partname.ext().to_ascii_lowercase();
        match Self::default_content_type(&ext, content_type) {
            Some(ct) => {
                self.defaults.insert(ext, ct);
            },
            None => {
                self.overrides
                    .insert(partname.to_string(), content_type.to_string());
            },
        }
    }

    fn default_content_type(ext: &str, content_type: &str) -> Option<&'static str> {
        match (ext, content_type) {
            ("rels", ct::OPC_RELATIONSHIPS) => Some(ct::OPC_RELATIONSHIPS),
            ("xml", ct::XML) => Some(ct::XML),
            ("png", ct::PNG) => Some(ct::PNG),
            ("jpg" | "jpeg", ct::JPEG) => Some(ct::JPEG),
            ("gif", ct::GIF) => Some(ct::GIF),
            ("bmp", ct::BMP) => Some(ct::BMP),
            ("tif" | "tiff", ct::TIFF) => Some(ct::TIFF),
            _ => None,
        }
    }

    fn to_xml(&self) -> Result<String> {
        let xml_err = |e: std::fmt::Error| OpcError::XmlError(e.to_string());
        let mut xml = String::with_capacity(2048);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        write!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES).map_err(xml_err)?;

        for (ext, content_type) in &self.defaults {
            write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            )
            .map_err(xml_err)?;
        }

        for (partname, content_type) in &self.overrides {
            write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            )
            .map_err(xml_err)?;
        }

        xml.push_str("</Types>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type;
    use crate::ooxml::opc::part::{BlobPart, Part, XmlPart};

    fn sample_package() -> OpcPackage {
        let mut pkg = OpcPackage::new();
        let pres = PackURI::new("/ppt/presentation.xml").unwrap();
        let image = PackURI::new("/ppt/media/image1.png").unwrap();

        let mut pres_part = XmlPart::new(
            pres.clone(),
            ct::PML_PRESENTATION_MAIN.to_string(),
            b"<p:presentation/>".to_vec(),
        );
        pres_part.relate_to(&image, relationship_type::IMAGE);

        pkg.add_part(Box::new(pres_part));
        pkg.add_part(Box::new(BlobPart::new(
            image,
            ct::PNG.to_string(),
            vec![0x89, b'P', b'N', b'G'],
        )));
        pkg.relate_to(&pres, relationship_type::OFFICE_DOCUMENT);
        pkg
    }

    #[test]
    fn test_content_types_xml() {
        let cti = ContentTypesItem::from_package(&sample_package());
        let xml = cti.to_xml().unwrap();

        assert!(xml.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert!(xml.contains(r#"<Override PartName="/ppt/presentation.xml""#));
        assert!(!xml.contains(r#"PartName="/ppt/media/image1.png""#));
    }

    #[test]
    fn test_round_trip() {
        let bytes = PackageWriter::to_bytes(&sample_package()).unwrap();
        let pkg = OpcPackage::from_bytes(&bytes).unwrap();

        assert_eq!(pkg.part_count(), 2);
        let main = pkg.main_document_part().unwrap();
        assert_eq!(main.content_type(), ct::PML_PRESENTATION_MAIN);

        let r_id = main.rels().iter().next().unwrap().r_id().to_string();
        let image = main.related_partname(&r_id).unwrap();
        assert_eq!(image.as_str(), "/ppt/media/image1.png");
        assert_eq!(pkg.get_part(&image).unwrap().blob(), &[0x89, b'P', b'N', b'G']);
    }
}
