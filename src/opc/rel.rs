//! Relationships between parts in an OPC package.

use std::collections::HashMap;

use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::PackURI;

/// A single relationship from a source part to a target.
///
/// Internal relationships point at another part in the package,
/// external ones at an arbitrary URI outside it.
#[derive(Debug, Clone)]
pub struct Relationship {
    r_id: String,
    reltype: String,
    target_ref: String,
    base_uri: String,
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

    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Absolute part name of the target, resolved against the source
    /// part's base URI. External relationships have no part name.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "external relationship {} has no target part",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// The collection of relationships owned by one source (the package
/// itself or an individual part), keyed by relationship id.
#[derive(Debug, Clone)]
pub struct Relationships {
    base_uri: String,
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: HashMap::new(),
        }
    }

    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) {
        let rel = Relationship::new(
            r_id.clone(),
            reltype,
            target_ref,
            self.base_uri.clone(),
            is_external,
        );
        self.rels.insert(r_id, rel);
    }

    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// The single relationship of the given type.
    ///
    /// Errors when none exists, or when several do and the choice
    /// would be ambiguous.
    pub fn rel_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matches = self.rels.values().filter(|rel| rel.reltype() == reltype);
        let first = matches
            .next()
            .ok_or_else(|| OpcError::RelationshipNotFound(reltype.to_string()))?;
        if matches.next().is_some() {
            return Err(OpcError::InvalidRelationship(format!(
                "multiple relationships of type {reltype}"
            )));
        }
        Ok(first)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.values()
    }

    pub fn len(&self) -> usize {
        self.rels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::relationship_type;

    #[test]
    fn test_target_partname_resolution() {
        let mut rels = Relationships::new("/ppt".to_string());
        rels.add_relationship(
            relationship_type::SLIDE.to_string(),
            "slides/slide1.xml".to_string(),
            "rId2".to_string(),
            false,
        );

        let rel = rels.get("rId2").unwrap();
        assert_eq!(rel.r_id(), "rId2");
        assert_eq!(rel.target_ref(), "slides/slide1.xml");
        assert!(!rel.is_external());
        assert_eq!(rel.target_partname().unwrap().as_str(), "/ppt/slides/slide1.xml");
    }

    #[test]
    fn test_external_relationship_has_no_partname() {
        let mut rels = Relationships::new("/ppt".to_string());
        rels.add_relationship(
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink"
                .to_string(),
            "https://example.com/".to_string(),
            "rId9".to_string(),
            true,
        );

        assert!(rels.get("rId9").unwrap().target_partname().is_err());
    }

    #[test]
    fn test_rel_with_reltype() {
        let mut rels = Relationships::new("/".to_string());
        assert!(rels.rel_with_reltype(relationship_type::OFFICE_DOCUMENT).is_err());

        rels.add_relationship(
            relationship_type::OFFICE_DOCUMENT.to_string(),
            "ppt/presentation.xml".to_string(),
            "rId1".to_string(),
            false,
        );
        let rel = rels.rel_with_reltype(relationship_type::OFFICE_DOCUMENT).unwrap();
        assert_eq!(rel.target_partname().unwrap().as_str(), "/ppt/presentation.xml");

        rels.add_relationship(
            relationship_type::OFFICE_DOCUMENT.to_string(),
            "ppt/other.xml".to_string(),
            "rId2".to_string(),
            false,
        );
        assert!(rels.rel_with_reltype(relationship_type::OFFICE_DOCUMENT).is_err());
    }

    #[test]
    fn test_len_and_iter() {
        let mut rels = Relationships::new("/".to_string());
        assert!(rels.is_empty());

        rels.add_relationship(
            relationship_type::IMAGE.to_string(),
            "media/image1.png".to_string(),
            "rId1".to_string(),
            false,
        );
        assert_eq!(rels.len(), 1);
        assert_eq!(rels.iter().count(), 1);
    }
}
