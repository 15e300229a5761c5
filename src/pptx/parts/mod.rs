//! Wrappers over raw package parts that parse PresentationML on
//! demand instead of building a document tree up front.

pub mod presentation;
pub mod slide;

pub use presentation::PresentationPart;
pub use slide::{SlideLayoutPart, SlideMasterPart, SlidePart};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::pptx::error::Result;

/// Collect relationship ids from every element with the given local
/// name, in document order.
///
/// The id-list elements carry both a plain numeric `id` and a
/// namespaced `r:id`. Both have the local name `id`, so the `rId`
/// value prefix is what tells them apart.
pub(crate) fn collect_rids(xml: &[u8], element: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut rids = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == element => {
                if let Some(rid) = rid_attr(&e)? {
                    rids.push(rid);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(rids)
}

fn rid_attr(e: &BytesStart) -> Result<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"id" {
            let value = attr.unescape_value()?;
            if value.starts_with("rId") {
                return Ok(Some(value.into_owned()));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_rids_in_document_order() {
        let xml = br#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:sldIdLst>
    <p:sldId id="256" r:id="rId6"/>
    <p:sldId id="257" r:id="rId2"/>
    <p:sldId id="258" r:id="rId4"/>
  </p:sldIdLst>
</p:presentation>"#;
        let rids = collect_rids(xml, b"sldId").unwrap();
        assert_eq!(rids, vec!["rId6", "rId2", "rId4"]);
    }

    #[test]
    fn test_numeric_id_is_not_a_rid() {
        let xml = br#"<p:sldIdLst xmlns:p="p"><p:sldId id="256"/></p:sldIdLst>"#;
        assert!(collect_rids(xml, b"sldId").unwrap().is_empty());
    }
}
