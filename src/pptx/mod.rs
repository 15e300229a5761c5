//! PowerPoint (.pptx) presentation reading.
//!
//! Layered on top of the OPC module: the package layer validates the
//! container, the parts layer parses individual PresentationML
//! streams, and the high-level types stitch parts together through
//! relationships.

pub mod error;
pub mod package;
pub mod parts;
pub mod presentation;
pub mod shapes;
pub mod slide;

pub use error::PptxError;
pub use package::PptxPackage;
pub use presentation::Presentation;
pub use shapes::{BaseShape, Font, FontColor, Paragraph, Run, ShapeType, TextFrame};
pub use slide::{Slide, SlideLayout, SlideMaster};
