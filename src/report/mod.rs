//! Template analysis and report rendering.
//!
//! [`TemplateAnalysis`] walks a presentation once and collects the
//! counts and per-slide details; [`render`] writes them out in the
//! fixed report layout.

pub mod analysis;
pub mod labels;
pub mod render;
pub mod stats;

pub use analysis::TemplateAnalysis;
pub use render::render;
pub use stats::FrequencyTable;
