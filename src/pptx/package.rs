//! Opening presentation packages.

use std::io::{Read, Seek};
use std::path::Path;

use crate::opc::OpcPackage;
use crate::opc::constants::content_type;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::parts::PresentationPart;
use crate::pptx::presentation::Presentation;

/// A loaded `.pptx` package.
pub struct PptxPackage {
    opc: OpcPackage,
}

impl PptxPackage {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let opc = OpcPackage::open(path)?;
        Self::from_opc(opc)
    }

    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let opc = OpcPackage::from_reader(reader)?;
        Self::from_opc(opc)
    }

    /// Accept the package only when its main part is a presentation,
    /// macro-enabled or not.
    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_content_type = opc.main_document_part()?.content_type();
        if main_content_type != content_type::PML_PRESENTATION_MAIN
            && main_content_type != content_type::PML_PRES_MACRO_MAIN
        {
            return Err(PptxError::InvalidContentType {
                expected: content_type::PML_PRESENTATION_MAIN.to_string(),
                got: main_content_type.to_string(),
            });
        }
        tracing::debug!("opened presentation package with {} parts", opc.part_count());
        Ok(Self { opc })
    }

    /// The presentation document inside this package.
    pub fn presentation(&self) -> Result<Presentation<'_>> {
        let main = self.opc.main_document_part()?;
        Ok(Presentation::new(
            PresentationPart::from_part(main),
            &self.opc,
        ))
    }

    pub fn opc(&self) -> &OpcPackage {
        &self.opc
    }
}
