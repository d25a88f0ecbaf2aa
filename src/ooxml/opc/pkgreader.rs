//! Low-level, read-only view of a serialized OPC package.
//!
//! Parses `[Content_Types].xml`, then walks the relationship graph from the
//! package relationships, loading every reachable part exactly once.

use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

/// Relationships of one source; most parts have only a handful.
pub type SerializedRels = SmallVec<[SerializedRelationship; 8]>;

/// A part as loaded from the physical package, before becoming a `Part`.
#[derive(Debug)]
pub struct SerializedPart {
    pub partname: PackURI,
    pub content_type: String,
    pub blob: Vec<u8>,
    pub srels: SerializedRels,
}

/// A relationship as read from a `.rels` file.
#[derive(Debug, Clone)]
pub struct SerializedRelationship {
    /// Directory of the source, for resolving relative targets
    pub base_uri: String,
    pub r_id: String,
    pub reltype: String,
    pub target_ref: String,
    pub target_mode: String,
}

impl SerializedRelationship {
    #[inline]
    pub fn is_external(&self) -> bool {
        self.target_mode == target_mode::EXTERNAL
    }

    /// Absolute partname of an internal target.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external() {
            return Err(OpcError::InvalidRelationship(format!(
                "{} is external and has no partname",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Content type lookup built from `[Content_Types].xml`.
///
/// Overrides (by partname) win over defaults (by extension).
struct ContentTypeMap {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self {
            defaults: HashMap::new(),
            overrides: HashMap::new(),
        };
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match e.local_name().as_ref() {
                        b"Default" => {
                            if let (Some(ext), Some(ct)) =
                                (attr(e, b"Extension")?, attr(e, b"ContentType")?)
                            {
                                map.defaults.insert(ext.to_ascii_lowercase(), ct);
                            }
                        },
                        b"Override" => {
                            if let (Some(pn), Some(ct)) =
                                (attr(e, b"PartName")?, attr(e, b"ContentType")?)
                            {
                                map.overrides.insert(pn.to_ascii_lowercase(), ct);
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!(
                        "Content types parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
        }

        Ok(map)
    }

    fn get(&self, pack_uri: &PackURI) -> Result<String> {
        if let Some(ct) = self.overrides.get(&pack_uri.as_str().to_ascii_lowercase()) {
            return Ok(ct.clone());
        }

        self.defaults
            .get(&pack_uri.ext().to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| OpcError::ContentTypeNotFound(pack_uri.to_string()))
    }
}

/// Read one unescaped attribute value by exact key.
fn attr(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Package reader: all reachable parts plus the package-level relationships.
pub struct PackageReader {
    pkg_srels: SerializedRels,
    sparts: Vec<SerializedPart>,
}

impl PackageReader {
    /// Parse the package structure out of a physical reader.
    ///
    /// Blobs are moved out of `phys_reader` as parts are discovered.
    pub fn from_phys_reader(mut phys_reader: PhysPkgReader) -> Result<Self> {
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        let content_types = ContentTypeMap::from_xml(phys_reader.blob_for(&content_types_uri)?)?;

        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let pkg_srels = Self::load_rels(&phys_reader, &package_uri)?;

        let sparts = Self::load_parts(&mut phys_reader, &pkg_srels, &content_types)?;

        Ok(Self { pkg_srels, sparts })
    }

    fn load_rels(phys_reader: &PhysPkgReader, source_uri: &PackURI) -> Result<SerializedRels> {
        match phys_reader.rels_xml_for(source_uri)? {
            Some(xml) => Self::parse_rels_xml(xml, source_uri.base_uri()),
            None => Ok(SmallVec::new()),
        }
    }

    fn parse_rels_xml(rels_xml: &[u8], base_uri: &str) -> Result<SerializedRels> {
        let mut srels = SmallVec::new();
        let mut reader = Reader::from_reader(rels_xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let (Some(r_id), Some(reltype), Some(target_ref)) =
                        (attr(e, b"Id")?, attr(e, b"Type")?, attr(e, b"Target")?)
                    else {
                        continue;
                    };
                    let target_mode = attr(e, b"TargetMode")?
                        .unwrap_or_else(|| target_mode::INTERNAL.to_string());

                    srels.push(SerializedRelationship {
                        base_uri: base_uri.to_string(),
                        r_id,
                        reltype,
                        target_ref,
                        target_mode,
                    });
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::XmlError(format!("Rels parse error: {}", e))),
                _ => {},
            }
        }

        Ok(srels)
    }

    /// Walk the relationship graph depth-first, visiting each partname once.
    ///
    /// Targets that are referenced but absent from the archive are skipped;
    /// real-world decks occasionally carry dangling relationships.
    fn load_parts(
        phys_reader: &mut PhysPkgReader,
        pkg_srels: &[SerializedRelationship],
        content_types: &ContentTypeMap,
    ) -> Result<Vec<SerializedPart>> {
        let mut sparts = Vec::with_capacity(32);
        let mut visited = HashSet::with_capacity(32);
        let mut work_queue: Vec<PackURI> = Vec::with_capacity(pkg_srels.len());

        let mut enqueue = |srels: &[SerializedRelationship], queue: &mut Vec<PackURI>| {
            for srel in srels.iter().filter(|srel| !srel.is_external()) {
                if let Ok(partname) = srel.target_partname()
                    && visited.insert(partname.clone())
                {
                    queue.push(partname);
                }
            }
        };

        enqueue(pkg_srels, &mut work_queue);

        while let Some(partname) = work_queue.pop() {
            if !phys_reader.contains(&partname) {
                continue;
            }

            let srels = Self::load_rels(phys_reader, &partname)?;
            enqueue(&srels, &mut work_queue);

            let content_type = content_types.get(&partname)?;
            let blob = phys_reader
                .take_blob(&partname)
                .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))?;

            sparts.push(SerializedPart {
                partname,
                content_type,
                blob,
                srels,
            });
        }

        Ok(sparts)
    }

    /// Package-level relationships.
    pub fn pkg_srels(&self) -> &[SerializedRelationship] {
        &self.pkg_srels
    }

    /// Take ownership of all serialized parts.
    pub fn take_sparts(&mut self) -> Vec<SerializedPart> {
        std::mem::take(&mut self.sparts)
    }
}
