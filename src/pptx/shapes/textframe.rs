//! Text bodies, paragraphs, and runs.
//!
//! A shape's text lives in a `txBody` element holding `a:p`
//! paragraphs. Paragraph content is a sequence of `a:r` runs, `a:br`
//! line breaks, and `a:fld` fields. Character formatting sits on the
//! run properties element `a:rPr`, and anything not set there is
//! inherited at display time from the placeholder, layout, master, or
//! theme chain.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::common::{FontSize, RGBColor};
use crate::pptx::error::{PptxError, Result};

/// A run's explicit character formatting. `None` means the run does
/// not set the attribute itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    name: Option<String>,
    size: Option<FontSize>,
    bold: Option<bool>,
    color: Option<FontColor>,
}

impl Font {
    /// Latin typeface name from `a:latin`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn size(&self) -> Option<FontSize> {
        self.size
    }

    pub fn bold(&self) -> Option<bool> {
        self.bold
    }

    pub fn color(&self) -> Option<&FontColor> {
        self.color.as_ref()
    }

    /// The explicit RGB fill, when the run carries one. Theme color
    /// references resolve to `None`, since turning them into RGB
    /// would need the theme's color map.
    pub fn rgb(&self) -> Option<RGBColor> {
        match self.color {
            Some(FontColor::Rgb(color)) => Some(color),
            _ => None,
        }
    }
}

/// A text color as written in run properties.
#[derive(Debug, Clone, PartialEq)]
pub enum FontColor {
    /// Explicit sRGB value from `srgbClr`.
    Rgb(RGBColor),
    /// Theme color name from `schemeClr`, e.g. `accent1`.
    Scheme(String),
}

/// A contiguous stretch of identically formatted text.
#[derive(Debug, Clone, Default)]
pub struct Run {
    text: String,
    font: Font,
}

impl Run {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &Font {
        &self.font
    }
}

/// The text frame of a shape.
pub struct TextFrame<'a> {
    xml: &'a [u8],
}

impl<'a> TextFrame<'a> {
    pub(crate) fn from_xml(xml: &'a [u8]) -> Self {
        Self { xml }
    }

    /// The frame's paragraphs, in document order.
    pub fn paragraphs(&self) -> Result<Vec<Paragraph<'a>>> {
        let mut reader = Reader::from_reader(self.xml);
        let mut paragraphs = Vec::new();

        loop {
            let tag_start = reader.buffer_position() as usize;
            match reader.read_event()? {
                Event::Start(e) if e.local_name().as_ref() == b"p" => {
                    reader.read_to_end(e.name())?;
                    let end = reader.buffer_position() as usize;
                    paragraphs.push(Paragraph {
                        xml: &self.xml[tag_start..end],
                    });
                }
                Event::Empty(e) if e.local_name().as_ref() == b"p" => {
                    let end = reader.buffer_position() as usize;
                    paragraphs.push(Paragraph {
                        xml: &self.xml[tag_start..end],
                    });
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(paragraphs)
    }

    /// The full text of the frame: paragraph texts joined by newlines.
    /// Empty paragraphs contribute empty lines.
    pub fn text(&self) -> Result<String> {
        let mut lines = Vec::new();
        for paragraph in self.paragraphs()? {
            lines.push(paragraph.text()?);
        }
        Ok(lines.join("\n"))
    }
}

/// One paragraph of a text frame.
pub struct Paragraph<'a> {
    xml: &'a [u8],
}

impl<'a> Paragraph<'a> {
    /// The paragraph's visible text. Runs and fields contribute their
    /// characters, each `a:br` contributes a newline.
    pub fn text(&self) -> Result<String> {
        let mut reader = Reader::from_reader(self.xml);
        let mut text = String::new();
        let mut in_t = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"t" => in_t = true,
                    b"br" => text.push('\n'),
                    _ => {}
                },
                Event::Empty(e) if e.local_name().as_ref() == b"br" => text.push('\n'),
                Event::End(e) if e.local_name().as_ref() == b"t" => in_t = false,
                Event::Text(e) if in_t => text.push_str(&decode_text(e.as_ref())?),
                Event::GeneralRef(e) if in_t => text.push(decode_reference(e.as_ref())?),
                Event::CData(e) if in_t => {
                    text.push_str(
                        std::str::from_utf8(e.as_ref())
                            .map_err(|err| PptxError::Xml(err.to_string()))?,
                    );
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(text)
    }

    /// The paragraph's runs. Line breaks, fields, and the
    /// end-of-paragraph properties are not runs and carry no weight
    /// in formatting statistics.
    pub fn runs(&self) -> Result<Vec<Run>> {
        parse_runs(self.xml)
    }
}

fn decode_text(raw: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(raw).map_err(|err| PptxError::Xml(err.to_string()))?;
    let unescaped =
        quick_xml::escape::unescape(text).map_err(|err| PptxError::Xml(err.to_string()))?;
    Ok(unescaped.into_owned())
}

/// Decode one reference event: its name without the surrounding `&`
/// and `;`. Character references and the five predefined entities are
/// supported; presentations declare no custom entities.
fn decode_reference(raw: &[u8]) -> Result<char> {
    let name = std::str::from_utf8(raw).map_err(|err| PptxError::Xml(err.to_string()))?;
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            if let Some(digits) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
            } else if let Some(digits) = name.strip_prefix('#') {
                digits.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                None
            }
        }
    };
    resolved.ok_or_else(|| PptxError::Xml(format!("unresolvable reference '&{name};'")))
}

/// Walk one paragraph subtree and build its runs.
///
/// Fill colors are only read from a `solidFill` sitting directly
/// under `rPr`. Fills nested further down, such as an outline's,
/// color the outline rather than the glyphs.
fn parse_runs(xml: &[u8]) -> Result<Vec<Run>> {
    let mut reader = Reader::from_reader(xml);
    let mut runs = Vec::new();

    let mut current: Option<Run> = None;
    let mut in_t = false;
    // Nesting depth below <a:rPr>, None while outside of it.
    let mut rpr_depth: Option<u32> = None;
    let mut in_direct_fill = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if let Some(depth) = rpr_depth.as_mut() {
                    read_rpr_child(&e, *depth == 0, in_direct_fill, current.as_mut())?;
                    if *depth == 0 && e.local_name().as_ref() == b"solidFill" {
                        in_direct_fill = true;
                    }
                    *depth += 1;
                } else if current.is_some() {
                    match e.local_name().as_ref() {
                        b"rPr" => {
                            if let Some(run) = current.as_mut() {
                                read_rpr_attrs(&e, &mut run.font)?;
                            }
                            rpr_depth = Some(0);
                        }
                        b"t" => in_t = true,
                        _ => {}
                    }
                } else if e.local_name().as_ref() == b"r" {
                    current = Some(Run::default());
                }
            }
            Event::Empty(e) => {
                if let Some(depth) = rpr_depth.as_ref() {
                    read_rpr_child(&e, *depth == 0, in_direct_fill, current.as_mut())?;
                } else if current.is_some() && e.local_name().as_ref() == b"rPr" {
                    if let Some(run) = current.as_mut() {
                        read_rpr_attrs(&e, &mut run.font)?;
                    }
                }
            }
            Event::End(e) => {
                if let Some(depth) = rpr_depth.as_mut() {
                    if *depth == 0 {
                        // This end tag closes rPr itself.
                        rpr_depth = None;
                    } else {
                        *depth -= 1;
                        if *depth == 0 {
                            in_direct_fill = false;
                        }
                    }
                } else {
                    match e.local_name().as_ref() {
                        b"t" => in_t = false,
                        b"r" => {
                            if let Some(run) = current.take() {
                                runs.push(run);
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::Text(e) if in_t => {
                if let Some(run) = current.as_mut() {
                    run.text.push_str(&decode_text(e.as_ref())?);
                }
            }
            Event::GeneralRef(e) if in_t => {
                if let Some(run) = current.as_mut() {
                    run.text.push(decode_reference(e.as_ref())?);
                }
            }
            Event::CData(e) if in_t => {
                if let Some(run) = current.as_mut() {
                    run.text.push_str(
                        std::str::from_utf8(e.as_ref())
                            .map_err(|err| PptxError::Xml(err.to_string()))?,
                    );
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(runs)
}

/// Pull `sz` and `b` off the rPr element itself.
fn read_rpr_attrs(e: &BytesStart, font: &mut Font) -> Result<()> {
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"sz" => {
                let value = attr.unescape_value()?;
                match value.parse::<u32>() {
                    Ok(centipoints) => font.size = Some(FontSize::from_centipoints(centipoints)),
                    Err(_) => tracing::debug!("ignoring unparseable sz attribute '{}'", value),
                }
            }
            b"b" => {
                let value = attr.unescape_value()?;
                font.bold = match value.as_ref() {
                    "1" | "true" => Some(true),
                    "0" | "false" => Some(false),
                    _ => None,
                };
            }
            _ => {}
        }
    }
    Ok(())
}

/// Handle one element inside rPr: the latin typeface and, within a
/// direct solidFill, the color value.
fn read_rpr_child(
    e: &BytesStart,
    is_direct_child: bool,
    in_direct_fill: bool,
    run: Option<&mut Run>,
) -> Result<()> {
    let Some(run) = run else {
        return Ok(());
    };
    match e.local_name().as_ref() {
        b"latin" if is_direct_child && run.font.name.is_none() => {
            for attr in e.attributes().flatten() {
                if attr.key.as_ref() == b"typeface" {
                    run.font.name = Some(attr.unescape_value()?.into_owned());
                    break;
                }
            }
        }
        b"srgbClr" if in_direct_fill && run.font.color.is_none() => {
            for attr in e.attributes().flatten() {
                if attr.key.as_ref() == b"val" {
                    let value = attr.unescape_value()?;
                    match RGBColor::from_hex(&value) {
                        Some(color) => run.font.color = Some(FontColor::Rgb(color)),
                        None => tracing::debug!("ignoring unparseable srgbClr value '{}'", value),
                    }
                    break;
                }
            }
        }
        b"schemeClr" if in_direct_fill && run.font.color.is_none() => {
            for attr in e.attributes().flatten() {
                if attr.key.as_ref() == b"val" {
                    run.font.color = Some(FontColor::Scheme(attr.unescape_value()?.into_owned()));
                    break;
                }
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(xml: &str) -> Vec<Run> {
        parse_runs(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_run_text_and_formatting() {
        let runs = paragraph(
            r#"<a:p xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <a:r>
    <a:rPr lang="ja-JP" sz="1800" b="1">
      <a:solidFill><a:srgbClr val="1F4E79"/></a:solidFill>
      <a:latin typeface="Meiryo UI"/>
    </a:rPr>
    <a:t>見出し</a:t>
  </a:r>
</a:p>"#,
        );

        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text(), "見出し");

        let font = runs[0].font();
        assert_eq!(font.name(), Some("Meiryo UI"));
        assert_eq!(font.size(), Some(FontSize::from_centipoints(1800)));
        assert_eq!(font.bold(), Some(true));
        assert_eq!(font.rgb(), Some(RGBColor::new(0x1F, 0x4E, 0x79)));
    }

    #[test]
    fn test_run_without_properties() {
        let runs = paragraph(r#"<a:p xmlns:a="a"><a:r><a:t>plain</a:t></a:r></a:p>"#);

        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text(), "plain");

        let font = runs[0].font();
        assert_eq!(font.name(), None);
        assert_eq!(font.size(), None);
        assert_eq!(font.bold(), None);
        assert_eq!(font.rgb(), None);
    }

    #[test]
    fn test_bold_off_is_explicit() {
        let runs = paragraph(r#"<a:p xmlns:a="a"><a:r><a:rPr b="0"/><a:t>x</a:t></a:r></a:p>"#);
        assert_eq!(runs[0].font().bold(), Some(false));
    }

    #[test]
    fn test_scheme_color_is_kept_but_not_rgb() {
        let runs = paragraph(
            r#"<a:p xmlns:a="a"><a:r><a:rPr><a:solidFill><a:schemeClr val="accent1"/></a:solidFill></a:rPr><a:t>x</a:t></a:r></a:p>"#,
        );

        let font = runs[0].font();
        assert_eq!(
            font.color(),
            Some(&FontColor::Scheme("accent1".to_string()))
        );
        assert_eq!(font.rgb(), None);
    }

    #[test]
    fn test_outline_fill_does_not_color_the_text() {
        let runs = paragraph(
            r#"<a:p xmlns:a="a"><a:r><a:rPr><a:ln><a:solidFill><a:srgbClr val="FF0000"/></a:solidFill></a:ln></a:rPr><a:t>x</a:t></a:r></a:p>"#,
        );
        assert_eq!(runs[0].font().color(), None);
    }

    #[test]
    fn test_fields_and_breaks_are_not_runs() {
        let xml = r#"<a:p xmlns:a="a">
  <a:r><a:t>page </a:t></a:r>
  <a:br/>
  <a:fld id="{X}" type="slidenum"><a:rPr sz="900"/><a:t>7</a:t></a:fld>
</a:p>"#;
        let runs = paragraph(xml);

        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text(), "page ");
        assert_eq!(runs[0].font().size(), None);
    }

    #[test]
    fn test_paragraph_text_includes_fields_and_breaks() {
        let para = Paragraph {
            xml: br#"<a:p xmlns:a="a"><a:r><a:t>page </a:t></a:r><a:br/><a:fld id="{X}" type="slidenum"><a:t>7</a:t></a:fld></a:p>"#,
        };
        assert_eq!(para.text().unwrap(), "page \n7");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let runs = paragraph(r#"<a:p xmlns:a="a"><a:r><a:t>R&amp;D &lt;2026&gt;</a:t></a:r></a:p>"#);
        assert_eq!(runs[0].text(), "R&D <2026>");
    }

    #[test]
    fn test_character_references_are_decoded() {
        let runs = paragraph(r#"<a:p xmlns:a="a"><a:r><a:t>&#169; 2026&#x3000;FMT</a:t></a:r></a:p>"#);
        assert_eq!(runs[0].text(), "\u{a9} 2026\u{3000}FMT");
    }

    #[test]
    fn test_text_frame_joins_paragraphs_with_newlines() {
        let xml = br#"<p:sp xmlns:p="p" xmlns:a="a"><p:txBody>
  <a:p><a:r><a:t>first</a:t></a:r></a:p>
  <a:p/>
  <a:p><a:r><a:t>third</a:t></a:r></a:p>
</p:txBody></p:sp>"#;
        let frame = TextFrame::from_xml(xml);

        assert_eq!(frame.paragraphs().unwrap().len(), 3);
        assert_eq!(frame.text().unwrap(), "first\n\nthird");
    }

    #[test]
    fn test_multiple_runs_in_one_paragraph() {
        let runs = paragraph(
            r#"<a:p xmlns:a="a"><a:r><a:rPr sz="1200"/><a:t>one </a:t></a:r><a:r><a:rPr sz="2400"/><a:t>two</a:t></a:r></a:p>"#,
        );

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].font().size(), Some(FontSize::from_centipoints(1200)));
        assert_eq!(runs[1].font().size(), Some(FontSize::from_centipoints(2400)));
    }
}
