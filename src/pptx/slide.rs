//! High-level slide, layout, and master access.

use crate::opc::constants::relationship_type;
use crate::opc::{OpcPackage, PackURI, Part};
use crate::pptx::error::{PptxError, Result};
use crate::pptx::parts::{SlideLayoutPart, SlideMasterPart, SlidePart};
use crate::pptx::shapes::BaseShape;

/// One slide, able to reach related parts through its package.
pub struct Slide<'a> {
    part: SlidePart<'a>,
    package: &'a OpcPackage,
}

impl<'a> Slide<'a> {
    pub fn new(part: SlidePart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    /// Top-level shapes of this slide, in document order.
    pub fn shapes(&self) -> Result<Vec<BaseShape>> {
        self.part.shapes()
    }

    /// The layout this slide is based on. Every well-formed slide
    /// carries exactly one slideLayout relationship.
    pub fn layout(&self) -> Result<SlideLayout<'a>> {
        let rel = self
            .part
            .part()
            .rels()
            .rel_with_reltype(relationship_type::SLIDE_LAYOUT)?;
        let partname = rel.target_partname()?;
        let part = self.package.get_part(&partname)?;
        Ok(SlideLayout::new(SlideLayoutPart::from_part(part)))
    }
}

/// A slide layout.
pub struct SlideLayout<'a> {
    part: SlideLayoutPart<'a>,
}

impl<'a> SlideLayout<'a> {
    pub fn new(part: SlideLayoutPart<'a>) -> Self {
        Self { part }
    }

    /// The layout's display name, empty when it has none.
    pub fn name(&self) -> Result<String> {
        self.part.name()
    }
}

/// A slide master and the layouts declared on it.
pub struct SlideMaster<'a> {
    part: SlideMasterPart<'a>,
    package: &'a OpcPackage,
}

impl<'a> SlideMaster<'a> {
    pub fn new(part: SlideMasterPart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    /// The master's layouts, in the order its layout id list declares
    /// them.
    pub fn layouts(&self) -> Result<Vec<SlideLayout<'a>>> {
        let mut layouts = Vec::new();
        for rid in self.part.slide_layout_rids()? {
            let target_ref = self.part.part().target_ref(&rid)?;
            let partname =
                PackURI::from_rel_ref(self.part.part().partname().base_uri(), target_ref)
                    .map_err(PptxError::InvalidFormat)?;
            let part = self.package.get_part(&partname)?;
            layouts.push(SlideLayout::new(SlideLayoutPart::from_part(part)));
        }
        Ok(layouts)
    }
}
