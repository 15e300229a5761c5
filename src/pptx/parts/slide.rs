//! Slide, slide layout, and slide master parts.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::opc::Part;
use crate::pptx::error::Result;
use crate::pptx::parts::collect_rids;
use crate::pptx::shapes::{BaseShape, ShapeType};

pub struct SlidePart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlidePart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { part }
    }

    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    /// Top-level shapes of the slide's shape tree, in document order.
    /// Shapes nested inside a group stay within the group's subtree
    /// and are not listed individually; markup-compatibility wrappers
    /// and their contents are not listed either.
    pub fn shapes(&self) -> Result<Vec<BaseShape>> {
        extract_shapes(self.part.blob())
    }
}

pub struct SlideLayoutPart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlideLayoutPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { part }
    }

    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    /// The layout's display name, empty when it has none.
    pub fn name(&self) -> Result<String> {
        csld_name(self.part.blob())
    }
}

pub struct SlideMasterPart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlideMasterPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { part }
    }

    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    /// Relationship ids of the master's layouts, in declaration order.
    pub fn slide_layout_rids(&self) -> Result<Vec<String>> {
        collect_rids(self.part.blob(), b"sldLayoutId")
    }
}

/// Cut each top-level shape element out of the slide XML as a raw
/// subtree. Shapes are taken from the direct children of `spTree`
/// only, so a shape repeated inside an `mc:AlternateContent` wrapper
/// is not picked up from its compatibility branches. Skipping to the
/// matching end tag keeps grouped shapes inside their group's bytes.
fn extract_shapes(xml: &[u8]) -> Result<Vec<BaseShape>> {
    let mut reader = Reader::from_reader(xml);
    let mut shapes = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"spTree" => break,
            Event::Eof => return Ok(shapes),
            _ => {}
        }
    }

    // Depth below spTree. Shape candidates sit at zero; the first end
    // tag seen there is the tree's own.
    let mut depth = 0u32;
    loop {
        let tag_start = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(e) => match shape_type_for(e.local_name().as_ref()) {
                Some(shape_type) if depth == 0 => {
                    reader.read_to_end(e.name())?;
                    let end = reader.buffer_position() as usize;
                    shapes.push(BaseShape::parse(xml[tag_start..end].to_vec(), shape_type));
                }
                _ => depth += 1,
            },
            Event::Empty(e) => {
                if depth == 0 {
                    if let Some(shape_type) = shape_type_for(e.local_name().as_ref()) {
                        let end = reader.buffer_position() as usize;
                        shapes.push(BaseShape::parse(xml[tag_start..end].to_vec(), shape_type));
                    }
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(shapes)
}

fn shape_type_for(local: &[u8]) -> Option<ShapeType> {
    match local {
        b"sp" => Some(ShapeType::Shape),
        b"pic" => Some(ShapeType::Picture),
        b"graphicFrame" => Some(ShapeType::GraphicFrame),
        b"grpSp" => Some(ShapeType::GroupShape),
        b"cxnSp" => Some(ShapeType::Connector),
        _ => None,
    }
}

/// Display name from the `cSld` element's `name` attribute.
fn csld_name(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"cSld" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"name" {
                        return Ok(attr.unescape_value()?.into_owned());
                    }
                }
                return Ok(String::new());
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::content_type;
    use crate::opc::{PackURI, XmlPart};

    fn slide_part(xml: &str) -> XmlPart {
        XmlPart::load(
            PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            content_type::PML_SLIDE.to_string(),
            xml.as_bytes().to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn test_shapes_in_document_order() {
        let part = slide_part(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <p:cSld><p:spTree>
    <p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr>
    <p:grpSpPr/>
    <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/></p:nvSpPr><p:spPr/></p:sp>
    <p:pic><p:nvPicPr><p:cNvPr id="3" name="Picture 2"/></p:nvPicPr></p:pic>
    <p:cxnSp><p:nvCxnSpPr><p:cNvPr id="4" name="Connector 3"/></p:nvCxnSpPr></p:cxnSp>
  </p:spTree></p:cSld>
</p:sld>"#,
        );
        let shapes = SlidePart::from_part(&part).shapes().unwrap();

        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].shape_type(), ShapeType::Shape);
        assert_eq!(shapes[0].name(), "Title 1");
        assert_eq!(shapes[1].shape_type(), ShapeType::Picture);
        assert_eq!(shapes[2].shape_type(), ShapeType::Connector);
    }

    #[test]
    fn test_grouped_shapes_stay_in_their_group() {
        let part = slide_part(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld><p:spTree>
    <p:grpSp>
      <p:nvGrpSpPr><p:cNvPr id="5" name="Group 4"/></p:nvGrpSpPr>
      <p:sp><p:nvSpPr><p:cNvPr id="6" name="Inner 5"/></p:nvSpPr></p:sp>
      <p:sp><p:nvSpPr><p:cNvPr id="7" name="Inner 6"/></p:nvSpPr></p:sp>
    </p:grpSp>
    <p:sp><p:nvSpPr><p:cNvPr id="8" name="After 7"/></p:nvSpPr></p:sp>
  </p:spTree></p:cSld>
</p:sld>"#,
        );
        let shapes = SlidePart::from_part(&part).shapes().unwrap();

        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].shape_type(), ShapeType::GroupShape);
        assert_eq!(shapes[0].name(), "Group 4");
        assert_eq!(shapes[1].name(), "After 7");
    }

    #[test]
    fn test_alternate_content_shapes_are_passed_over() {
        // The same ink shape appears once per compatibility branch;
        // neither copy is a direct child of the tree.
        let part = slide_part(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">
  <p:cSld><p:spTree>
    <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/></p:nvSpPr></p:sp>
    <mc:AlternateContent>
      <mc:Choice Requires="p159">
        <p:sp><p:nvSpPr><p:cNvPr id="3" name="Ink 2"/></p:nvSpPr></p:sp>
      </mc:Choice>
      <mc:Fallback>
        <p:pic><p:nvPicPr><p:cNvPr id="3" name="Ink 2"/></p:nvPicPr></p:pic>
      </mc:Fallback>
    </mc:AlternateContent>
  </p:spTree></p:cSld>
</p:sld>"#,
        );
        let shapes = SlidePart::from_part(&part).shapes().unwrap();

        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].name(), "Title 1");
    }

    #[test]
    fn test_empty_shape_tree() {
        let part = slide_part(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree/></p:cSld></p:sld>"#,
        );
        assert!(SlidePart::from_part(&part).shapes().unwrap().is_empty());
    }

    #[test]
    fn test_layout_name() {
        let part = XmlPart::load(
            PackURI::new("/ppt/slideLayouts/slideLayout1.xml").unwrap(),
            content_type::PML_SLIDE_LAYOUT.to_string(),
            br#"<p:sldLayout xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld name="Title Slide"><p:spTree/></p:cSld></p:sldLayout>"#
                .to_vec(),
        )
        .unwrap();
        assert_eq!(SlideLayoutPart::from_part(&part).name().unwrap(), "Title Slide");
    }

    #[test]
    fn test_layout_name_absent() {
        let part = XmlPart::load(
            PackURI::new("/ppt/slideLayouts/slideLayout1.xml").unwrap(),
            content_type::PML_SLIDE_LAYOUT.to_string(),
            br#"<p:sldLayout xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree/></p:cSld></p:sldLayout>"#
                .to_vec(),
        )
        .unwrap();
        assert_eq!(SlideLayoutPart::from_part(&part).name().unwrap(), "");
    }

    #[test]
    fn test_master_layout_rids() {
        let part = XmlPart::load(
            PackURI::new("/ppt/slideMasters/slideMaster1.xml").unwrap(),
            content_type::PML_SLIDE_MASTER.to_string(),
            br#"<p:sldMaster xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:sldLayoutIdLst>
    <p:sldLayoutId id="2147483649" r:id="rId1"/>
    <p:sldLayoutId id="2147483650" r:id="rId2"/>
  </p:sldLayoutIdLst>
</p:sldMaster>"#
                .to_vec(),
        )
        .unwrap();
        assert_eq!(
            SlideMasterPart::from_part(&part).slide_layout_rids().unwrap(),
            vec!["rId1", "rId2"]
        );
    }
}
