//! Writing the analysis report.
//!
//! The layout is fixed: a ruled header, the deck-wide statistics,
//! the master inventory, then a ruled section with the per-slide
//! breakdown. Rows under a heading are indented two spaces per
//! level. Every dimension prints in inches with two decimals.

use std::io::{self, Write};

use crate::report::analysis::TemplateAnalysis;
use crate::report::labels;

/// Ranking depths of the three frequency sections.
const TOP_FONT_ROWS: usize = 10;
const TOP_SIZE_ROWS: usize = 10;
const TOP_COLOR_ROWS: usize = 15;

/// Write the full report for `analysis` to `out`.
pub fn render(analysis: &TemplateAnalysis, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", labels::RULE)?;
    writeln!(out, "{}", labels::ANALYSIS_TITLE)?;
    writeln!(out, "{}", labels::RULE)?;

    writeln!(out, "\n{}: {}", labels::SLIDE_COUNT, analysis.slide_count)?;

    writeln!(out, "\n{}", labels::SLIDE_SIZE)?;
    writeln!(
        out,
        "  {}: {:.2} {}",
        labels::SLIDE_WIDTH,
        analysis.slide_width.inches(),
        labels::INCHES
    )?;
    writeln!(
        out,
        "  {}: {:.2} {}",
        labels::SLIDE_HEIGHT,
        analysis.slide_height.inches(),
        labels::INCHES
    )?;

    writeln!(out, "\n{}", labels::FONT_USAGE)?;
    for (label, count) in analysis.fonts.top(TOP_FONT_ROWS) {
        writeln!(out, "  {}: {}{}", label, count, labels::OCCURRENCES)?;
    }

    writeln!(out, "\n{}", labels::FONT_SIZE_USAGE)?;
    for (label, count) in analysis.font_sizes.top(TOP_SIZE_ROWS) {
        writeln!(out, "  {}: {}{}", label, count, labels::OCCURRENCES)?;
    }

    writeln!(out, "\n{}", labels::COLOR_USAGE)?;
    for (label, count) in analysis.colors.top(TOP_COLOR_ROWS) {
        writeln!(out, "  #{}: {}{}", label, count, labels::OCCURRENCES)?;
    }

    writeln!(out, "\n{}: {}", labels::MASTER_COUNT, analysis.masters.len())?;
    for (index, master) in analysis.masters.iter().enumerate() {
        writeln!(out, "\n  {} {}:", labels::MASTER, index + 1)?;
        writeln!(
            out,
            "    {}: {}",
            labels::LAYOUT_COUNT,
            master.layout_names.len()
        )?;
        for (layout_index, name) in master.layout_names.iter().enumerate() {
            writeln!(out, "      [{layout_index}] {name}")?;
        }
    }

    writeln!(out, "\n{}", labels::RULE)?;
    writeln!(out, "{}", labels::DETAIL_TITLE)?;
    writeln!(out, "{}", labels::RULE)?;

    for (index, slide) in analysis.slides.iter().enumerate() {
        writeln!(
            out,
            "\n{} {}: {}",
            labels::SLIDE,
            index + 1,
            slide.layout_name
        )?;
        for shape in &slide.shapes {
            // Shapes without text keep their place in the ordering
            // but print nothing.
            let Some(text) = &shape.text else {
                continue;
            };
            writeln!(
                out,
                "  [{:.2}, {:.2}] w={:.2} h={:.2}",
                shape.left.inches(),
                shape.top.inches(),
                shape.width.inches(),
                shape.height.inches()
            )?;
            writeln!(out, "    {}: {}", labels::TEXT_FIELD, text)?;
            if let Some(font) = &shape.font {
                let name = font.name.as_deref().unwrap_or(labels::INHERIT);
                let size = font
                    .size
                    .map(|size| size.to_string())
                    .unwrap_or_else(|| labels::INHERIT.to_string());
                let bold = match font.bold {
                    Some(flag) => flag.to_string(),
                    None => labels::BOLD_UNSET.to_string(),
                };
                writeln!(
                    out,
                    "    {}: {} / {} / {}={}",
                    labels::FONT_FIELD,
                    name,
                    size,
                    labels::BOLD_FIELD,
                    bold
                )?;
            }
        }
    }

    Ok(())
}
