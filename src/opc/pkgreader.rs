//! Deserialization of a package into its serialized parts.
//!
//! Reading starts from the package-level rels stream and follows
//! relationships breadth-first until every reachable part has been
//! visited. Parts never referenced by any relationship chain are not
//! loaded, which mirrors how consumers are expected to treat OPC
//! packages.

use std::collections::{HashSet, VecDeque};
use std::collections::HashMap;
use std::io::{Read, Seek};

use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

use crate::opc::constants::target_mode;
use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::{PACKAGE_URI, PackURI};
use crate::opc::phys::PhysPkgReader;

/// A relationship as read from a rels stream, before resolution.
#[derive(Debug, Clone)]
pub struct SerializedRelationship {
    pub(crate) base_uri: String,
    pub(crate) r_id: String,
    pub(crate) reltype: String,
    pub(crate) target_ref: String,
    pub(crate) target_mode: String,
}

impl SerializedRelationship {
    pub fn is_external(&self) -> bool {
        self.target_mode == target_mode::EXTERNAL
    }

    /// Absolute part name of the target, resolved against the source
    /// part's base URI.
    pub fn target_partname(&self) -> Result<PackURI> {
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// A part as read from the archive, before being unmarshalled into
/// the package graph.
#[derive(Debug)]
pub struct SerializedPart {
    pub(crate) partname: PackURI,
    pub(crate) content_type: String,
    pub(crate) blob: Vec<u8>,
    pub(crate) srels: SmallVec<[SerializedRelationship; 8]>,
}

/// Mapping from part names to content types, as declared by the
/// `[Content_Types].xml` stream.
#[derive(Debug, Default)]
pub struct ContentTypeMap {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    pub fn from_xml(content_types_xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(content_types_xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                    b"Default" => {
                        let mut extension = None;
                        let mut content_type = None;
                        for attr in e.attributes() {
                            let attr = attr?;
                            match attr.key.as_ref() {
                                b"Extension" => {
                                    extension = Some(attr.unescape_value()?.into_owned());
                                }
                                b"ContentType" => {
                                    content_type = Some(attr.unescape_value()?.into_owned());
                                }
                                _ => {}
                            }
                        }
                        if let (Some(extension), Some(content_type)) = (extension, content_type) {
                            map.add_default(extension, content_type);
                        }
                    }
                    b"Override" => {
                        let mut partname = None;
                        let mut content_type = None;
                        for attr in e.attributes() {
                            let attr = attr?;
                            match attr.key.as_ref() {
                                b"PartName" => {
                                    partname = Some(attr.unescape_value()?.into_owned());
                                }
                                b"ContentType" => {
                                    content_type = Some(attr.unescape_value()?.into_owned());
                                }
                                _ => {}
                            }
                        }
                        if let (Some(partname), Some(content_type)) = (partname, content_type) {
                            map.add_override(partname, content_type);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(map)
    }

    /// Extensions are matched case-insensitively.
    pub fn add_default(&mut self, extension: String, content_type: String) {
        self.defaults.insert(extension.to_lowercase(), content_type);
    }

    pub fn add_override(&mut self, partname: String, content_type: String) {
        self.overrides.insert(partname, content_type);
    }

    /// Content type for a part name. Overrides win over extension
    /// defaults.
    pub fn get(&self, partname: &PackURI) -> Result<&str> {
        if let Some(content_type) = self.overrides.get(partname.as_str()) {
            return Ok(content_type);
        }
        if let Some(content_type) = self.defaults.get(&partname.ext().to_lowercase()) {
            return Ok(content_type);
        }
        Err(OpcError::ContentTypeNotFound(partname.as_str().to_string()))
    }
}

/// Reads the serialized form of a package out of its physical archive.
pub struct PackageReader {
    pkg_srels: SmallVec<[SerializedRelationship; 8]>,
    sparts: Vec<SerializedPart>,
}

impl PackageReader {
    pub fn from_phys_reader<R: Read + Seek>(phys: &mut PhysPkgReader<R>) -> Result<Self> {
        let content_types = ContentTypeMap::from_xml(&phys.content_types_xml()?)?;
        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let pkg_srels = Self::srels_for(phys, &package_uri)?;
        let sparts = Self::walk_parts(phys, &pkg_srels, &content_types)?;
        tracing::debug!("read {} parts from package", sparts.len());
        Ok(Self { pkg_srels, sparts })
    }

    pub fn take_pkg_srels(&mut self) -> SmallVec<[SerializedRelationship; 8]> {
        std::mem::take(&mut self.pkg_srels)
    }

    pub fn take_sparts(&mut self) -> Vec<SerializedPart> {
        std::mem::take(&mut self.sparts)
    }

    /// Relationships sourced from one part, or none when the part has
    /// no rels stream.
    fn srels_for<R: Read + Seek>(
        phys: &mut PhysPkgReader<R>,
        source_uri: &PackURI,
    ) -> Result<SmallVec<[SerializedRelationship; 8]>> {
        let rels_uri = source_uri.rels_uri();
        match phys.try_blob_for(rels_uri.membername())? {
            Some(rels_xml) => parse_rels_xml(&rels_xml, source_uri.base_uri()),
            None => Ok(SmallVec::new()),
        }
    }

    /// Visit every part reachable through the relationship graph.
    fn walk_parts<R: Read + Seek>(
        phys: &mut PhysPkgReader<R>,
        pkg_srels: &[SerializedRelationship],
        content_types: &ContentTypeMap,
    ) -> Result<Vec<SerializedPart>> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<PackURI> = VecDeque::new();
        let mut sparts = Vec::new();

        for srel in pkg_srels {
            if srel.is_external() {
                continue;
            }
            let partname = srel.target_partname()?;
            if visited.insert(partname.as_str().to_string()) {
                queue.push_back(partname);
            }
        }

        while let Some(partname) = queue.pop_front() {
            let srels = Self::srels_for(phys, &partname)?;
            for srel in &srels {
                if srel.is_external() {
                    continue;
                }
                let target = srel.target_partname()?;
                if visited.insert(target.as_str().to_string()) {
                    queue.push_back(target);
                }
            }
            let blob = phys.blob_for(partname.membername())?;
            let content_type = content_types.get(&partname)?.to_string();
            sparts.push(SerializedPart {
                partname,
                content_type,
                blob,
                srels,
            });
        }

        Ok(sparts)
    }
}

/// Parse one rels stream. Elements missing a required attribute are
/// skipped rather than failing the whole stream.
pub(crate) fn parse_rels_xml(
    rels_xml: &[u8],
    base_uri: &str,
) -> Result<SmallVec<[SerializedRelationship; 8]>> {
    let mut reader = Reader::from_reader(rels_xml);
    reader.config_mut().trim_text(true);
    let mut srels = SmallVec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut r_id = None;
                let mut reltype = None;
                let mut target_ref = None;
                let mut mode = target_mode::INTERNAL.to_string();
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.as_ref() {
                        b"Id" => r_id = Some(attr.unescape_value()?.into_owned()),
                        b"Type" => reltype = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target_ref = Some(attr.unescape_value()?.into_owned()),
                        b"TargetMode" => mode = attr.unescape_value()?.into_owned(),
                        _ => {}
                    }
                }
                if let (Some(r_id), Some(reltype), Some(target_ref)) = (r_id, reltype, target_ref) {
                    srels.push(SerializedRelationship {
                        base_uri: base_uri.to_string(),
                        r_id,
                        reltype,
                        target_ref,
                        target_mode: mode,
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(srels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::{content_type, relationship_type};

    #[test]
    fn test_content_type_map() {
        let xml = br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="PNG" ContentType="image/png"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#;
        let map = ContentTypeMap::from_xml(xml).unwrap();

        let pres = PackURI::new("/ppt/presentation.xml").unwrap();
        assert_eq!(map.get(&pres).unwrap(), content_type::PML_PRESENTATION_MAIN);

        let image = PackURI::new("/ppt/media/image1.png").unwrap();
        assert_eq!(map.get(&image).unwrap(), content_type::PNG);

        let other = PackURI::new("/ppt/media/movie1.avi").unwrap();
        assert!(matches!(map.get(&other), Err(OpcError::ContentTypeNotFound(_))));
    }

    #[test]
    fn test_parse_rels_xml() {
        let xml = br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/" TargetMode="External"/>
  <Relationship Id="rId3" Type="missing-target"/>
</Relationships>"#;
        let srels = parse_rels_xml(xml, "/ppt/slides").unwrap();

        assert_eq!(srels.len(), 2);
        assert_eq!(srels[0].r_id, "rId1");
        assert_eq!(srels[0].reltype, relationship_type::SLIDE_LAYOUT);
        assert!(!srels[0].is_external());
        assert_eq!(
            srels[0].target_partname().unwrap().as_str(),
            "/ppt/slideLayouts/slideLayout1.xml"
        );
        assert!(srels[1].is_external());
    }
}
