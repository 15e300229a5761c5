//! Building a template analysis from a presentation.
//!
//! One pass collects the formatting statistics over every slide, a
//! second describes the leading slides shape by shape. Only explicit
//! run-level formatting is counted; inherited values are invisible at
//! this level and read as unset.

use crate::common::{FontSize, Length};
use crate::pptx::error::Result;
use crate::pptx::shapes::{FontColor, TextFrame};
use crate::pptx::{PptxPackage, Slide};
use crate::report::stats::FrequencyTable;

/// How many slides get a per-slide breakdown.
pub(crate) const DETAIL_SLIDE_LIMIT: usize = 5;

/// How many characters of shape text the breakdown shows.
pub(crate) const TEXT_PREVIEW_CHARS: usize = 50;

/// Everything the rendered report needs to know about one template.
pub struct TemplateAnalysis {
    pub(crate) slide_count: usize,
    pub(crate) slide_width: Length,
    pub(crate) slide_height: Length,
    pub(crate) fonts: FrequencyTable,
    pub(crate) font_sizes: FrequencyTable,
    pub(crate) colors: FrequencyTable,
    pub(crate) masters: Vec<MasterSummary>,
    pub(crate) slides: Vec<SlideDetail>,
}

/// One slide master and the names of its layouts, in declaration
/// order.
pub struct MasterSummary {
    pub(crate) layout_names: Vec<String>,
}

/// Breakdown of one leading slide.
pub struct SlideDetail {
    pub(crate) layout_name: String,
    pub(crate) shapes: Vec<ShapeDetail>,
}

/// One top-level shape: its bounding box, and when it holds text,
/// a preview plus the leading run's formatting.
pub struct ShapeDetail {
    pub(crate) name: String,
    pub(crate) left: Length,
    pub(crate) top: Length,
    pub(crate) width: Length,
    pub(crate) height: Length,
    pub(crate) text: Option<String>,
    pub(crate) font: Option<FontSummary>,
}

/// The formatting of a shape's leading run.
pub struct FontSummary {
    pub(crate) name: Option<String>,
    pub(crate) size: Option<FontSize>,
    pub(crate) bold: Option<bool>,
}

impl TemplateAnalysis {
    pub fn from_package(package: &PptxPackage) -> Result<Self> {
        let presentation = package.presentation()?;
        let (slide_width, slide_height) = presentation.slide_size()?;
        let slide_count = presentation.slide_count()?;
        let slides = presentation.slides()?;

        let mut fonts = FrequencyTable::new();
        let mut font_sizes = FrequencyTable::new();
        let mut colors = FrequencyTable::new();
        for slide in &slides {
            tally_slide(slide, &mut fonts, &mut font_sizes, &mut colors)?;
        }

        let mut masters = Vec::new();
        for master in presentation.slide_masters()? {
            let mut layout_names = Vec::new();
            for layout in master.layouts()? {
                layout_names.push(layout.name()?);
            }
            masters.push(MasterSummary { layout_names });
        }

        let mut details = Vec::new();
        for slide in slides.iter().take(DETAIL_SLIDE_LIMIT) {
            details.push(describe_slide(slide)?);
        }

        Ok(Self {
            slide_count,
            slide_width,
            slide_height,
            fonts,
            font_sizes,
            colors,
            masters,
            slides: details,
        })
    }
}

/// Count every run's explicit font name, size label, and RGB color.
/// Theme color references have no RGB value here and stay out of the
/// color table. Empty font names and zero sizes count as unset.
fn tally_slide(
    slide: &Slide<'_>,
    fonts: &mut FrequencyTable,
    font_sizes: &mut FrequencyTable,
    colors: &mut FrequencyTable,
) -> Result<()> {
    for shape in slide.shapes()? {
        let Some(frame) = shape.text_frame() else {
            continue;
        };
        for paragraph in frame.paragraphs()? {
            for run in paragraph.runs()? {
                let font = run.font();
                if let Some(name) = font.name().filter(|name| !name.is_empty()) {
                    fonts.increment(name);
                }
                if let Some(size) = font.size().filter(|size| size.centipoints() != 0) {
                    font_sizes.increment(&size.to_string());
                }
                match font.color() {
                    Some(FontColor::Rgb(color)) => colors.increment(&color.to_hex()),
                    Some(FontColor::Scheme(scheme)) => {
                        tracing::debug!("theme color '{}' left out of the color counts", scheme);
                    }
                    None => {}
                }
            }
        }
    }
    Ok(())
}

/// Describe one slide: its layout name and every top-level shape,
/// ordered top to bottom, then left to right.
fn describe_slide(slide: &Slide<'_>) -> Result<SlideDetail> {
    let layout_name = slide.layout()?.name()?;

    let mut shapes = Vec::new();
    for shape in slide.shapes()? {
        let mut text = None;
        let mut font = None;
        if let Some(frame) = shape.text_frame() {
            let preview = preview_text(&frame.text()?);
            if !preview.is_empty() {
                font = representative_font(&frame)?;
                text = Some(preview);
            }
        }
        shapes.push(ShapeDetail {
            name: shape.name().to_string(),
            left: shape.left(),
            top: shape.top(),
            width: shape.width(),
            height: shape.height(),
            text,
            font,
        });
    }
    shapes.sort_by_key(|shape| (shape.top.emu(), shape.left.emu()));

    Ok(SlideDetail {
        layout_name,
        shapes,
    })
}

/// The leading characters of the frame text, newlines flattened to
/// spaces and surrounding whitespace trimmed. The cut is applied
/// before the newline replacement.
fn preview_text(text: &str) -> String {
    let truncated: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
    truncated.replace('\n', " ").trim().to_string()
}

/// Formatting of the leading run: the first run of the first
/// paragraph that has any. A frame whose text comes only from fields
/// has no leading run.
fn representative_font(frame: &TextFrame<'_>) -> Result<Option<FontSummary>> {
    for paragraph in frame.paragraphs()? {
        let runs = paragraph.runs()?;
        if let Some(first) = runs.first() {
            let font = first.font();
            return Ok(Some(FontSummary {
                name: font.name().filter(|name| !name.is_empty()).map(str::to_string),
                size: font.size().filter(|size| size.centipoints() != 0),
                bold: font.bold(),
            }));
        }
    }
    Ok(None)
}
