//! Longan - presentation template analysis for PowerPoint files
//!
//! This library opens a .pptx template, walks its slides, and
//! collects the formatting facts a template review needs: which
//! fonts, font sizes, and colors the deck actually uses, how its
//! masters and layouts are organized, and where the text sits on the
//! leading slides. The collected analysis renders as a fixed-layout
//! UTF-8 text report.
//!
//! # Features
//!
//! - **OPC container reader**: Parse the ZIP-based Open Packaging
//!   Conventions package that .pptx files use
//! - **PresentationML reader**: Navigate slides, layouts, masters,
//!   shapes, and text runs
//! - **Formatting statistics**: Frequency tables over run-level
//!   fonts, sizes, and RGB colors
//! - **Report rendering**: Deterministic text output, stable across
//!   runs on the same input
//!
//! # Example - Analyzing a template
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = longan::analyze_file("template.pptx")?;
//! print!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Walking slides by hand
//!
//! ```no_run
//! use longan::PptxPackage;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let package = PptxPackage::open("template.pptx")?;
//! let presentation = package.presentation()?;
//! println!("{} slides", presentation.slide_count()?);
//!
//! for slide in presentation.slides()? {
//!     for shape in slide.shapes()? {
//!         println!("shape: {}", shape.name());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

/// Shared primitives: lengths in EMU, font sizes, RGB colors
pub mod common;

/// Crate-level error type
pub mod error;

/// OPC (Open Packaging Conventions) container reader
///
/// This module reads the ZIP-based package shared by modern Office
/// formats: content types, parts, and the relationship graph that
/// ties them together.
pub mod opc;

/// PresentationML reader
///
/// This module navigates an opened package as a presentation:
/// slides, layouts, masters, shapes, and text runs.
pub mod pptx;

/// Template analysis and report rendering
pub mod report;

pub use common::{FontSize, Length, RGBColor};
pub use error::{Error, Result};
pub use pptx::PptxPackage;
pub use report::{TemplateAnalysis, render};

/// Analyze the presentation at `path` and return the rendered report.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let package = PptxPackage::open(path)?;
    let analysis = TemplateAnalysis::from_package(&package)?;
    let mut buffer = Vec::new();
    render(&analysis, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
