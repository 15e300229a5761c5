//! Value types shared by the parsing and reporting layers.

pub mod color;
pub mod unit;

pub use color::RGBColor;
pub use unit::{FontSize, Length};
