//! The presentation part, `/ppt/presentation.xml`.
//!
//! Holds the slide id list, the slide master id list, and the slide
//! size. The id lists give presentation order; the actual parts are
//! reached through the relationships carried alongside.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::opc::Part;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::parts::collect_rids;

/// Slide width used when the presentation omits `sldSz`, a 10 inch
/// wide 4:3 surface.
pub const DEFAULT_SLIDE_WIDTH_EMU: i64 = 9_144_000;

/// Slide height used when the presentation omits `sldSz`.
pub const DEFAULT_SLIDE_HEIGHT_EMU: i64 = 6_858_000;

pub struct PresentationPart<'a> {
    part: &'a dyn Part,
}

impl<'a> PresentationPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { part }
    }

    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    pub fn xml_bytes(&self) -> &'a [u8] {
        self.part.blob()
    }

    /// Number of entries in the slide id list.
    pub fn slide_count(&self) -> Result<usize> {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);
        let mut count = 0;
        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldId" => {
                    count += 1;
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(count)
    }

    /// Slide dimensions in EMU from `sldSz`, or `None` when the
    /// presentation does not declare a size.
    pub fn slide_size(&self) -> Result<Option<(i64, i64)>> {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);
        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldSz" => {
                    let mut cx = None;
                    let mut cy = None;
                    for attr in e.attributes().flatten() {
                        let value = std::str::from_utf8(&attr.value)
                            .ok()
                            .and_then(|s| s.parse::<i64>().ok());
                        match attr.key.as_ref() {
                            b"cx" => cx = value,
                            b"cy" => cy = value,
                            _ => {}
                        }
                    }
                    return match (cx, cy) {
                        (Some(cx), Some(cy)) => Ok(Some((cx, cy))),
                        _ => Err(PptxError::InvalidFormat(
                            "sldSz element is missing cx or cy".to_string(),
                        )),
                    };
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(None)
    }

    /// Relationship ids of the slides, in presentation order.
    pub fn slide_rids(&self) -> Result<Vec<String>> {
        collect_rids(self.xml_bytes(), b"sldId")
    }

    /// Relationship ids of the slide masters, in declaration order.
    pub fn slide_master_rids(&self) -> Result<Vec<String>> {
        collect_rids(self.xml_bytes(), b"sldMasterId")
    }
}
