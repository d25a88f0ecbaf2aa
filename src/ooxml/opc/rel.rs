use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
/// Relationship-related objects for OPC packages.
///
/// Relationships connect a source (a part or the package itself) to target
/// parts, identified by an rId that the source's XML refers to.
use std::collections::HashMap;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI relative to the source or an external URL
    target_ref: String,

    /// Directory of the source part, used to resolve relative targets
    base_uri: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: String,
        reltype: String,
        target_ref: String,
        base_uri: String,
        is_external: bool,
    ) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Absolute partname of the target.
    ///
    /// Returns an error for external relationships, which have no partname.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} is external and has no partname",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }

    /// Numeric suffix of an `rIdN` identifier, if it has one.
    fn r_id_number(&self) -> Option<u32> {
        parse_r_id(&self.r_id)
    }
}

fn parse_r_id(r_id: &str) -> Option<u32> {
    r_id.strip_prefix("rId")
        .and_then(|digits| atoi_simd::parse::<u32>(digits.as_bytes()).ok())
}

/// Collection of relationships from a single source, keyed by rId.
#[derive(Debug)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,

    /// Map of relationship ID to Relationship
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: HashMap::new(),
        }
    }

    /// Add a relationship with an explicit rId, replacing any previous one with that rId.
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) -> &Relationship {
        let rel = Relationship::new(
            r_id.clone(),
            reltype,
            target_ref,
            self.base_uri.clone(),
            is_external,
        );
        self.rels.entry(r_id).insert_entry(rel).into_mut()
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Get or add an internal relationship to `target_ref`, returning its rId.
    ///
    /// An existing relationship of the same type and target is reused.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> String {
        if let Some(rel) = self.rels.values().find(|rel| {
            !rel.is_external() && rel.reltype() == reltype && rel.target_ref() == target_ref
        }) {
            return rel.r_id().to_string();
        }

        let r_id = self.next_r_id();
        self.add_relationship(reltype.to_string(), target_ref.to_string(), r_id.clone(), false);
        r_id
    }

    /// Next free `rIdN`, filling the lowest gap first.
    fn next_r_id(&self) -> String {
        let mut used: Vec<u32> = self.rels.values().filter_map(Relationship::r_id_number).collect();
        used.sort_unstable();

        let mut next = 1u32;
        for n in used {
            if n == next {
                next += 1;
            } else if n > next {
                break;
            }
        }

        format!("rId{}", next)
    }

    /// The single relationship of `reltype`.
    ///
    /// Returns an error if there is none, or more than one.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matching = self.rels.values().filter(|rel| rel.reltype() == reltype);

        match (matching.next(), matching.next()) {
            (Some(rel), None) => Ok(rel),
            (None, _) => Err(OpcError::RelationshipNotFound(format!(
                "No relationship of type '{}'",
                reltype
            ))),
            (Some(_), Some(_)) => Err(OpcError::InvalidRelationship(format!(
                "Multiple relationships of type '{}'",
                reltype
            ))),
        }
    }

    /// Relationships in rId order (numeric where possible).
    pub fn sorted(&self) -> Vec<&Relationship> {
        let mut rels: Vec<&Relationship> = self.rels.values().collect();
        rels.sort_by(|a, b| {
            a.r_id_number()
                .cmp(&b.r_id_number())
                .then_with(|| a.r_id().cmp(b.r_id()))
        });
        rels
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize to the XML of a `.rels` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Relationships xmlns=""#);
        xml.push_str(namespace::OPC_RELATIONSHIPS);
        xml.push_str(r#"">"#);

        for rel in self.sorted() {
            let target_mode = if rel.is_external() {
                r#" TargetMode="External""#
            } else {
                ""
            };

            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape_xml(rel.r_id()),
                escape_xml(rel.reltype()),
                escape_xml(rel.target_ref()),
                target_mode
            ));
        }

        xml.push_str("</Relationships>");

        xml
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_r_id_fills_gaps() {
        let mut rels = Relationships::new("/ppt".to_string());
        assert_eq!(rels.next_r_id(), "rId1");

        rels.add_relationship("t".into(), "a.xml".into(), "rId1".into(), false);
        rels.add_relationship("t".into(), "c.xml".into(), "rId3".into(), false);
        assert_eq!(rels.next_r_id(), "rId2");
    }

    #[test]
    fn test_get_or_add_reuses_existing() {
        let mut rels = Relationships::new("/ppt/slides".to_string());

        assert_eq!(rels.get_or_add("image", "../media/image1.png"), "rId1");
        assert_eq!(rels.get_or_add("image", "../media/image1.png"), "rId1");
        assert_eq!(rels.get_or_add("image", "../media/image2.png"), "rId2");
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_target_partname_resolves_relative() {
        let mut rels = Relationships::new("/ppt/slides".to_string());
        let r_id = rels.get_or_add("layout", "../slideLayouts/slideLayout1.xml");
        let partname = rels.get(&r_id).unwrap().target_partname().unwrap();
        assert_eq!(partname.as_str(), "/ppt/slideLayouts/slideLayout1.xml");
    }

    #[test]
    fn test_to_xml_orders_numerically() {
        let mut rels = Relationships::new("/ppt".to_string());
        for n in [10, 2, 1] {
            rels.add_relationship("t".into(), format!("s{}.xml", n), format!("rId{}", n), false);
        }

        let xml = rels.to_xml();
        let first = xml.find(r#"Id="rId1""#).unwrap();
        let second = xml.find(r#"Id="rId2""#).unwrap();
        let tenth = xml.find(r#"Id="rId10""#).unwrap();
        assert!(first < second && second < tenth);
    }

    #[test]
    fn test_part_with_reltype() {
        let mut rels = Relationships::default();
        rels.get_or_add("office", "ppt/presentation.xml");
        assert!(rels.part_with_reltype("office").is_ok());
        assert!(rels.part_with_reltype("missing").is_err());

        rels.get_or_add("office", "ppt/other.xml");
        assert!(rels.part_with_reltype("office").is_err());
    }
}
