//! Parts, the individual content streams of an OPC package.

use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::PackURI;
use crate::opc::rel::Relationships;

/// Behavior shared by every part in a package.
pub trait Part {
    fn partname(&self) -> &PackURI;

    fn content_type(&self) -> &str;

    /// Raw bytes of the part's content stream.
    fn blob(&self) -> &[u8];

    /// Relationships sourced from this part.
    fn rels(&self) -> &Relationships;

    fn rels_mut(&mut self) -> &mut Relationships;

    /// Target reference of the relationship with the given id.
    fn target_ref(&self, r_id: &str) -> Result<&str> {
        self.rels()
            .get(r_id)
            .map(|rel| rel.target_ref())
            .ok_or_else(|| OpcError::RelationshipNotFound(r_id.to_string()))
    }
}

/// A part holding opaque binary content, such as an embedded image.
pub struct BlobPart {
    partname: PackURI,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl BlobPart {
    pub fn load(partname: PackURI, content_type: String, blob: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri().to_string());
        Self {
            partname,
            content_type,
            blob,
            rels,
        }
    }
}

impl Part for BlobPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> &[u8] {
        &self.blob
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

/// A part holding an XML stream, validated as UTF-8 when loaded.
pub struct XmlPart {
    partname: PackURI,
    content_type: String,
    xml: String,
    rels: Relationships,
}

impl XmlPart {
    pub fn load(partname: PackURI, content_type: String, blob: Vec<u8>) -> Result<Self> {
        let xml = String::from_utf8(blob).map_err(|err| {
            OpcError::XmlError(format!("part {partname} is not valid UTF-8: {err}"))
        })?;
        let rels = Relationships::new(partname.base_uri().to_string());
        Ok(Self {
            partname,
            content_type,
            xml,
            rels,
        })
    }

    pub fn xml_str(&self) -> &str {
        &self.xml
    }
}

impl Part for XmlPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> &[u8] {
        self.xml.as_bytes()
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

/// Constructs the appropriate part type for a content stream.
pub struct PartFactory;

impl PartFactory {
    pub fn load(partname: PackURI, content_type: String, blob: Vec<u8>) -> Result<Box<dyn Part>> {
        if is_xml_content_type(&content_type) {
            Ok(Box::new(XmlPart::load(partname, content_type, blob)?))
        } else {
            Ok(Box::new(BlobPart::load(partname, content_type, blob)))
        }
    }
}

pub(crate) fn is_xml_content_type(content_type: &str) -> bool {
    content_type.ends_with("+xml") || content_type.ends_with("/xml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::content_type;

    #[test]
    fn test_blob_part() {
        let partname = PackURI::new("/ppt/media/image1.png").unwrap();
        let part = BlobPart::load(partname, content_type::PNG.to_string(), vec![0x89, 0x50]);

        assert_eq!(part.partname().as_str(), "/ppt/media/image1.png");
        assert_eq!(part.content_type(), content_type::PNG);
        assert_eq!(part.blob(), &[0x89, 0x50]);
        assert!(part.rels().is_empty());
    }

    #[test]
    fn test_xml_part() {
        let partname = PackURI::new("/ppt/presentation.xml").unwrap();
        let part = XmlPart::load(
            partname,
            content_type::PML_PRESENTATION_MAIN.to_string(),
            b"<p:presentation/>".to_vec(),
        )
        .unwrap();

        assert_eq!(part.xml_str(), "<p:presentation/>");
        assert_eq!(part.blob(), b"<p:presentation/>");
    }

    #[test]
    fn test_xml_part_rejects_invalid_utf8() {
        let partname = PackURI::new("/ppt/presentation.xml").unwrap();
        let result = XmlPart::load(
            partname,
            content_type::PML_PRESENTATION_MAIN.to_string(),
            vec![0xFF, 0xFE, 0x00],
        );
        assert!(matches!(result, Err(OpcError::XmlError(_))));
    }

    #[test]
    fn test_target_ref() {
        let partname = PackURI::new("/ppt/presentation.xml").unwrap();
        let mut part = XmlPart::load(
            partname,
            content_type::PML_PRESENTATION_MAIN.to_string(),
            b"<p:presentation/>".to_vec(),
        )
        .unwrap();
        part.rels_mut().add_relationship(
            crate::opc::constants::relationship_type::SLIDE.to_string(),
            "slides/slide1.xml".to_string(),
            "rId2".to_string(),
            false,
        );

        assert_eq!(part.target_ref("rId2").unwrap(), "slides/slide1.xml");
        assert!(part.target_ref("rId99").is_err());
    }

    #[test]
    fn test_is_xml_content_type() {
        assert!(is_xml_content_type(content_type::PML_SLIDE));
        assert!(is_xml_content_type(content_type::XML));
        assert!(!is_xml_content_type(content_type::PNG));
        assert!(!is_xml_content_type("application/octet-stream"));
    }
}
