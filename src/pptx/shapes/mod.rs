//! Shapes and the text they carry.

pub mod base;
pub mod textframe;

pub use base::{BaseShape, ShapeType};
pub use textframe::{Font, FontColor, Paragraph, Run, TextFrame};
