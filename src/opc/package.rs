//! The in-memory form of an OPC package.
//!
//! A loaded package is a graph: parts are the nodes, relationships
//! the edges. The package itself carries the root relationships that
//! locate the main document part.

use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

use crate::opc::constants::relationship_type;
use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::{PACKAGE_URI, PackURI};
use crate::opc::part::{Part, PartFactory};
use crate::opc::phys::PhysPkgReader;
use crate::opc::pkgreader::PackageReader;
use crate::opc::rel::Relationships;

pub struct OpcPackage {
    rels: Relationships,
    parts: HashMap<String, Box<dyn Part>>,
}

impl OpcPackage {
    fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: HashMap::new(),
        }
    }

    /// Load a package from a file on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let phys = PhysPkgReader::open(path)?;
        Self::load(phys)
    }

    /// Load a package from any seekable byte source.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let phys = PhysPkgReader::new(reader)?;
        Self::load(phys)
    }

    fn load<R: Read + Seek>(mut phys: PhysPkgReader<R>) -> Result<Self> {
        let pkg_reader = PackageReader::from_phys_reader(&mut phys)?;
        Self::unmarshal(pkg_reader)
    }

    /// Build the part graph out of its serialized form, consuming the
    /// reader so blobs move instead of being copied.
    fn unmarshal(mut pkg_reader: PackageReader) -> Result<Self> {
        let mut package = Self::new();

        for srel in pkg_reader.take_pkg_srels() {
            let is_external = srel.is_external();
            package
                .rels
                .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
        }

        for spart in pkg_reader.take_sparts() {
            let mut part = PartFactory::load(spart.partname, spart.content_type, spart.blob)?;
            for srel in spart.srels {
                let is_external = srel.is_external();
                part.rels_mut()
                    .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
            }
            let partname = part.partname().as_str().to_string();
            package.parts.insert(partname, part);
        }

        Ok(package)
    }

    /// The part the package-level officeDocument relationship points
    /// at. For a presentation this is `/ppt/presentation.xml`.
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        let partname = self
            .rels
            .rel_with_reltype(relationship_type::OFFICE_DOCUMENT)?
            .target_partname()?;
        self.get_part(&partname)
    }

    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname.as_str())
            .map(|part| part.as_ref())
            .ok_or_else(|| OpcError::PartNotFound(partname.as_str().to_string()))
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn rels(&self) -> &Relationships {
        &self.rels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::content_type;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn create_minimal_pptx() -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let cursor = Cursor::new(&mut zip_data);
            let mut writer = ZipWriter::new(cursor);
            let options = SimpleFileOptions::default();

            writer.start_file("[Content_Types].xml", options).unwrap();
            writer
                .write_all(
                    br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
</Types>"#,
                )
                .unwrap();

            writer.start_file("_rels/.rels", options).unwrap();
            writer
                .write_all(
                    br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#,
                )
                .unwrap();

            writer.start_file("ppt/presentation.xml", options).unwrap();
            writer
                .write_all(
                    br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst>
  <p:sldSz cx="12192000" cy="6858000"/>
</p:presentation>"#,
                )
                .unwrap();

            writer
                .start_file("ppt/_rels/presentation.xml.rels", options)
                .unwrap();
            writer
                .write_all(
                    br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
</Relationships>"#,
                )
                .unwrap();

            writer.start_file("ppt/slides/slide1.xml", options).unwrap();
            writer
                .write_all(
                    br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld><p:spTree/></p:cSld>
</p:sld>"#,
                )
                .unwrap();

            writer.finish().unwrap();
        }
        zip_data
    }

    #[test]
    fn test_from_reader() {
        let package = OpcPackage::from_reader(Cursor::new(create_minimal_pptx())).unwrap();

        assert_eq!(package.part_count(), 2);
        assert_eq!(package.rels().len(), 1);

        let main = package.main_document_part().unwrap();
        assert_eq!(main.partname().as_str(), "/ppt/presentation.xml");
        assert_eq!(main.content_type(), content_type::PML_PRESENTATION_MAIN);
    }

    #[test]
    fn test_part_rels_are_attached() {
        let package = OpcPackage::from_reader(Cursor::new(create_minimal_pptx())).unwrap();

        let main = package.main_document_part().unwrap();
        assert_eq!(main.rels().len(), 1);
        assert_eq!(main.target_ref("rId2").unwrap(), "slides/slide1.xml");

        let slide_uri = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        let slide = package.get_part(&slide_uri).unwrap();
        assert_eq!(slide.content_type(), content_type::PML_SLIDE);
        assert!(slide.rels().is_empty());
    }

    #[test]
    fn test_get_part_unknown_name() {
        let package = OpcPackage::from_reader(Cursor::new(create_minimal_pptx())).unwrap();
        let missing = PackURI::new("/ppt/slides/slide2.xml").unwrap();
        assert!(matches!(
            package.get_part(&missing),
            Err(OpcError::PartNotFound(_))
        ));
    }

    #[test]
    fn test_open_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&create_minimal_pptx()).unwrap();
        file.flush().unwrap();

        let package = OpcPackage::open(file.path()).unwrap();
        assert_eq!(package.part_count(), 2);
    }

    #[test]
    fn test_open_missing_file() {
        assert!(matches!(
            OpcPackage::open("/nonexistent/deck.pptx"),
            Err(OpcError::IoError(_))
        ));
    }
}
