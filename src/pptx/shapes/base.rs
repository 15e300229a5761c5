//! Shape-level access to slide content.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::Length;
use crate::pptx::shapes::textframe::TextFrame;

/// Kinds of shape found in a shape tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Shape,
    Picture,
    GraphicFrame,
    GroupShape,
    Connector,
}

/// One shape from a slide's shape tree.
///
/// The name and geometry are read when the shape is cut out of the
/// slide XML. Text is parsed on demand, since most shapes never have
/// theirs inspected.
#[derive(Debug)]
pub struct BaseShape {
    xml: Vec<u8>,
    shape_type: ShapeType,
    name: String,
    left: Length,
    top: Length,
    width: Length,
    height: Length,
}

impl BaseShape {
    /// Build a shape from its element subtree. A shape without an
    /// explicit transform, such as one positioned by its placeholder,
    /// reads as zero on every axis.
    pub(crate) fn parse(xml: Vec<u8>, shape_type: ShapeType) -> Self {
        let (name, offset, extents) = scan_properties(&xml);
        let (x, y) = offset.unwrap_or((0, 0));
        let (cx, cy) = extents.unwrap_or((0, 0));
        Self {
            xml,
            shape_type,
            name: name.unwrap_or_default(),
            left: Length::from_emu(x),
            top: Length::from_emu(y),
            width: Length::from_emu(cx),
            height: Length::from_emu(cy),
        }
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// The shape's name from its non-visual drawing properties.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn left(&self) -> Length {
        self.left
    }

    pub fn top(&self) -> Length {
        self.top
    }

    pub fn width(&self) -> Length {
        self.width
    }

    pub fn height(&self) -> Length {
        self.height
    }

    /// Whether this kind of shape can carry a text frame. Only plain
    /// shapes do; pictures, connectors, graphic frames, and groups
    /// never own one.
    pub fn has_text_frame(&self) -> bool {
        self.shape_type == ShapeType::Shape
    }

    /// The shape's text frame, `None` for kinds that cannot have one.
    pub fn text_frame(&self) -> Option<TextFrame<'_>> {
        if self.has_text_frame() {
            Some(TextFrame::from_xml(&self.xml))
        } else {
            None
        }
    }
}

/// One pass over the shape subtree for the name and the first
/// offset and extents elements. For a group shape the first `off`
/// and `ext` belong to the group itself, the children's transforms
/// come later in the subtree.
#[allow(clippy::type_complexity)]
fn scan_properties(xml: &[u8]) -> (Option<String>, Option<(i64, i64)>, Option<(i64, i64)>) {
    let mut reader = Reader::from_reader(xml);
    let mut name = None;
    let mut offset = None;
    let mut extents = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"cNvPr" if name.is_none() => {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"name" {
                            name = attr.unescape_value().ok().map(|v| v.into_owned());
                            break;
                        }
                    }
                }
                b"off" if offset.is_none() => {
                    offset = Some(xy_attrs(&e, b"x", b"y"));
                }
                b"ext" if extents.is_none() => {
                    extents = Some(xy_attrs(&e, b"cx", b"cy"));
                }
                _ => {}
            },
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        if name.is_some() && offset.is_some() && extents.is_some() {
            break;
        }
    }
    (name, offset, extents)
}

fn xy_attrs(e: &quick_xml::events::BytesStart, first: &[u8], second: &[u8]) -> (i64, i64) {
    let mut a = 0i64;
    let mut b = 0i64;
    for attr in e.attributes().flatten() {
        let value = std::str::from_utf8(&attr.value)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(0);
        if attr.key.as_ref() == first {
            a = value;
        } else if attr.key.as_ref() == second {
            b = value;
        }
    }
    (a, b)
}
