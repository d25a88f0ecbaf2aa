//! Physical access to an OPC package (the ZIP container).
//!
//! The reader decompresses every member up front into memory, so later
//! lookups by part name are plain map reads and parts can be moved out
//! without copying. The writer streams members into an in-memory archive.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Physical package reader holding the decompressed members of a ZIP archive.
pub struct PhysPkgReader {
    /// Member name (no leading slash) to decompressed content
    members: HashMap<String, Vec<u8>>,
}

impl PhysPkgReader {
    /// Open an OPC package from a file path.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, isn't a valid ZIP file,
    /// or a member cannot be decompressed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Read a package from ZIP bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut members = HashMap::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            let mut blob = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut blob)?;
            members.insert(name, blob);
        }

        Ok(Self { members })
    }

    /// Get the content of a part by its PackURI.
    pub fn blob_for(&self, pack_uri: &PackURI) -> Result<&[u8]> {
        self.members
            .get(pack_uri.membername())
            .map(Vec::as_slice)
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    /// Move the content of a part out of the reader.
    pub fn take_blob(&mut self, pack_uri: &PackURI) -> Option<Vec<u8>> {
        self.members.remove(pack_uri.membername())
    }

    /// Get the relationships XML for a source URI, if the source has any.
    pub fn rels_xml_for(&self, source_uri: &PackURI) -> Result<Option<&[u8]>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        Ok(self.members.get(rels_uri.membername()).map(Vec::as_slice))
    }

    /// Check if a specific member exists in the package.
    #[inline]
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.members.contains_key(pack_uri.membername())
    }

    /// Number of file members in the package.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// All member names, sorted.
    pub fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Physical package writer producing ZIP bytes in memory.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write a part with Deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.write_with(pack_uri, blob, CompressionMethod::Deflated)
    }

    /// Write a part without compression, for content that is already compressed (images).
    pub fn write_stored(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.write_with(pack_uri, blob, CompressionMethod::Stored)
    }

    fn write_with(
        &mut self,
        pack_uri: &PackURI,
        blob: &[u8],
        method: CompressionMethod,
    ) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(method);
        self.archive.start_file(pack_uri.membername(), options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut writer = PhysPkgWriter::new();
        let text = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        let image = PackURI::new("/ppt/media/image1.png").unwrap();
        writer.write(&text, b"<p:sld/>").unwrap();
        writer.write_stored(&image, &[0x89, b'P', b'N', b'G']).unwrap();
        let zip_data = writer.finish().unwrap();

        let mut reader = PhysPkgReader::from_bytes(&zip_data).unwrap();
        assert_eq!(reader.len(), 2);
        assert_eq!(reader.blob_for(&text).unwrap(), b"<p:sld/>");
        assert_eq!(
            reader.member_names(),
            vec!["ppt/media/image1.png", "ppt/slides/slide1.xml"]
        );

        assert!(reader.take_blob(&image).is_some());
        assert!(!reader.contains(&image));
    }

    #[test]
    fn test_rels_lookup() {
        let mut writer = PhysPkgWriter::new();
        let rels = PackURI::new("/_rels/.rels").unwrap();
        writer.write(&rels, b"<Relationships/>").unwrap();
        let reader = PhysPkgReader::from_bytes(&writer.finish().unwrap()).unwrap();

        let package = PackURI::new("/").unwrap();
        assert_eq!(
            reader.rels_xml_for(&package).unwrap(),
            Some(&b"<Relationships/>"[..])
        );

        let part = PackURI::new("/ppt/presentation.xml").unwrap();
        assert_eq!(reader.rels_xml_for(&part).unwrap(), None);
    }

    #[test]
    fn test_open_missing_file() {
        let result = PhysPkgReader::open("/definitely/not/here.pptx");
        assert!(matches!(result, Err(OpcError::PackageNotFound(_))));
    }

    #[test]
    fn test_garbage_is_not_a_package() {
        assert!(PhysPkgReader::from_bytes(b"not a zip archive").is_err());
    }
}
