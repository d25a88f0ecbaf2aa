//! In-memory OPC package.
//!
//! `OpcPackage` owns every part plus the package-level relationships. It is
//! both the result of reading a `.pptx` and the staging area for writing one.

use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::{Part, PartFactory};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::pkgreader::{PackageReader, SerializedRelationship};
use crate::ooxml::opc::rel::Relationships;
use std::collections::BTreeMap;
use std::path::Path;

/// Main API type for working with OPC packages.
///
/// Parts are kept ordered by partname so that iteration, and therefore the
/// serialized archive, is deterministic.
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts in the package, indexed by partname
    parts: BTreeMap<PackURI, Box<dyn Part>>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: BTreeMap::new(),
        }
    }

    /// Open an OPC package from a file.
    ///
    /// # Example
    /// ```no_run
    /// use songdeck::ooxml::opc::package::OpcPackage;
    ///
    /// let pkg = OpcPackage::open("songs/1 Amazing Grace.pptx").unwrap();
    /// println!("{} parts", pkg.part_count());
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let phys_reader = PhysPkgReader::open(path)?;
        Self::from_phys_reader(phys_reader)
    }

    /// Load an OPC package from ZIP bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let phys_reader = PhysPkgReader::from_bytes(data)?;
        Self::from_phys_reader(phys_reader)
    }

    fn from_phys_reader(phys_reader: PhysPkgReader) -> Result<Self> {
        let mut pkg_reader = PackageReader::from_phys_reader(phys_reader)?;
        let mut package = Self::new();

        load_rels(&mut package.rels, pkg_reader.pkg_srels());

        for spart in pkg_reader.take_sparts() {
            let mut part = PartFactory::load(spart.partname.clone(), spart.content_type, spart.blob)?;
            load_rels(part.rels_mut(), &spart.srels);
            package.parts.insert(spart.partname, part);
        }

        Ok(package)
    }

    /// The main document part (for a presentation, `presentation.xml`).
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        self.part_by_reltype(relationship_type::OFFICE_DOCUMENT)
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname)
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get a mutable reference to a part by its partname.
    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut dyn Part> {
        match self.parts.get_mut(partname) {
            Some(part) => Ok(part.as_mut()),
            None => Err(OpcError::PartNotFound(partname.to_string())),
        }
    }

    /// Get a part targeted by a package-level relationship of `reltype`.
    pub fn part_by_reltype(&self, reltype: &str) -> Result<&dyn Part> {
        let rel = self.rels.part_with_reltype(reltype)?;
        let partname = rel.target_partname()?;
        self.get_part(&partname)
    }

    /// Follow relationship `r_id` of `source` to the part it targets.
    pub fn related_part(&self, source: &dyn Part, r_id: &str) -> Result<&dyn Part> {
        let partname = source.related_partname(r_id)?;
        self.get_part(&partname)
    }

    /// Add a part, replacing any existing part with the same partname.
    pub fn add_part(&mut self, part: Box<dyn Part>) {
        self.parts.insert(part.partname().clone(), part);
    }

    /// Iterate over all parts in partname order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|b| &**b as &dyn Part)
    }

    #[inline]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// Relate the package to a part, returning the (possibly reused) rId.
    pub fn relate_to(&mut self, partname: &PackURI, reltype: &str) -> String {
        let target_ref = partname.relative_ref(PACKAGE_URI);
        self.rels.get_or_add(reltype, &target_ref)
    }

    #[inline]
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

fn load_rels(rels: &mut Relationships, srels: &[SerializedRelationship]) {
    for srel in srels {
        rels.add_relationship(
            srel.reltype.clone(),
            srel.target_ref.clone(),
            srel.r_id.clone(),
            srel.is_external(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::part::XmlPart;

    fn xml_part(name: &str) -> Box<dyn Part> {
        Box::new(XmlPart::new(
            PackURI::new(name).unwrap(),
            "application/xml".to_string(),
            b"<root/>".to_vec(),
        ))
    }

    #[test]
    fn test_parts_iterate_in_partname_order() {
        let mut pkg = OpcPackage::new();
        pkg.add_part(xml_part("/ppt/slides/slide2.xml"));
        pkg.add_part(xml_part("/docProps/app.xml"));
        pkg.add_part(xml_part("/ppt/presentation.xml"));

        let names: Vec<&str> = pkg.iter_parts().map(|p| p.partname().as_str()).collect();
        assert_eq!(
            names,
            ["/docProps/app.xml", "/ppt/presentation.xml", "/ppt/slides/slide2.xml"]
        );
    }

    #[test]
    fn test_main_document_part() {
        let mut pkg = OpcPackage::new();
        let partname = PackURI::new("/ppt/presentation.xml").unwrap();
        pkg.add_part(xml_part(partname.as_str()));

        let r_id = pkg.relate_to(&partname, relationship_type::OFFICE_DOCUMENT);
        assert_eq!(r_id, "rId1");
        assert_eq!(pkg.rels().get("rId1").unwrap().target_ref(), "ppt/presentation.xml");
        // Relating twice reuses the relationship
        assert_eq!(pkg.relate_to(&partname, relationship_type::OFFICE_DOCUMENT), "rId1");

        let main = pkg.main_document_part().unwrap();
        assert_eq!(main.partname(), &partname);
    }

    #[test]
    fn test_missing_part() {
        let pkg = OpcPackage::new();
        let partname = PackURI::new("/ppt/slides/slide9.xml").unwrap();
        assert!(!pkg.contains_part(&partname));
        assert!(matches!(pkg.get_part(&partname), Err(OpcError::PartNotFound(_))));
        assert!(pkg.main_document_part().is_err());
    }
}
