//! The presentation document.

use crate::common::Length;
use crate::opc::{OpcPackage, PackURI, Part};
use crate::pptx::error::{PptxError, Result};
use crate::pptx::parts::presentation::{DEFAULT_SLIDE_HEIGHT_EMU, DEFAULT_SLIDE_WIDTH_EMU};
use crate::pptx::parts::{PresentationPart, SlideMasterPart, SlidePart};
use crate::pptx::slide::{Slide, SlideMaster};

pub struct Presentation<'a> {
    part: PresentationPart<'a>,
    package: &'a OpcPackage,
}

impl<'a> Presentation<'a> {
    pub fn new(part: PresentationPart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    /// Number of slides in the slide id list.
    pub fn slide_count(&self) -> Result<usize> {
        self.part.slide_count()
    }

    /// Slide dimensions, falling back to the standard 4:3 surface
    /// when the presentation does not declare a size.
    pub fn slide_size(&self) -> Result<(Length, Length)> {
        let (cx, cy) = self
            .part
            .slide_size()?
            .unwrap_or((DEFAULT_SLIDE_WIDTH_EMU, DEFAULT_SLIDE_HEIGHT_EMU));
        Ok((Length::from_emu(cx), Length::from_emu(cy)))
    }

    /// The slides, in presentation order.
    pub fn slides(&self) -> Result<Vec<Slide<'a>>> {
        let mut slides = Vec::new();
        for rid in self.part.slide_rids()? {
            let part = self.related_part(&rid)?;
            slides.push(Slide::new(SlidePart::from_part(part), self.package));
        }
        Ok(slides)
    }

    /// The slide masters, in declaration order.
    pub fn slide_masters(&self) -> Result<Vec<SlideMaster<'a>>> {
        let mut masters = Vec::new();
        for rid in self.part.slide_master_rids()? {
            let part = self.related_part(&rid)?;
            masters.push(SlideMaster::new(
                SlideMasterPart::from_part(part),
                self.package,
            ));
        }
        Ok(masters)
    }

    fn related_part(&self, rid: &str) -> Result<&'a dyn Part> {
        let target_ref = self.part.part().target_ref(rid)?;
        let partname =
            PackURI::from_rel_ref(self.part.part().partname().base_uri(), target_ref)
                .map_err(PptxError::InvalidFormat)?;
        Ok(self.package.get_part(&partname)?)
    }
}
