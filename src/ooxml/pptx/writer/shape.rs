/// Shape types and implementation for PPTX presentations.
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::parts::LINE_BREAK;
use std::fmt::Write as FmtWrite;
use std::sync::Arc;

pub use super::super::format::{ImageFormat, ParagraphAlignment, TextFormat, VerticalAnchor};

/// A shape on a slide (text box or picture).
#[derive(Debug, Clone)]
pub struct MutableShape {
    /// Shape ID, unique within the slide
    pub(crate) shape_id: u32,
    pub(crate) shape_type: ShapeType,
}

/// Position and size of a shape in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn write_xfrm(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
            self.x, self.y, self.width, self.height
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    TextBox {
        /// One entry per `<a:p>`
        paragraphs: Vec<String>,
        rect: Rect,
        format: TextFormat,
        alignment: ParagraphAlignment,
        anchor: VerticalAnchor,
        word_wrap: bool,
    },
    Picture {
        /// Shared so the same image can sit on many slides without copies
        data: Arc<[u8]>,
        format: ImageFormat,
        rect: Rect,
        description: String,
    },
}

impl MutableShape {
    /// Create a text box with one paragraph per entry of `paragraphs`.
    pub(crate) fn new_text_box(shape_id: u32, paragraphs: Vec<String>, rect: Rect) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::TextBox {
                paragraphs,
                rect,
                format: TextFormat::default(),
                alignment: ParagraphAlignment::default(),
                anchor: VerticalAnchor::default(),
                word_wrap: false,
            },
        }
    }

    pub(crate) fn new_picture(
        shape_id: u32,
        data: Arc<[u8]>,
        format: ImageFormat,
        rect: Rect,
        description: String,
    ) -> Self {
        Self {
            shape_id,
            shape_type: ShapeType::Picture {
                data,
                format,
                rect,
                description,
            },
        }
    }

    #[inline]
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    /// Set text formatting for every run (only for text boxes).
    pub fn set_text_format(&mut self, format: TextFormat) -> &mut Self {
        if let ShapeType::TextBox {
            format: ref mut f, ..
        } = self.shape_type
        {
            *f = format;
        }
        self
    }

    /// Builder method: horizontal alignment of every paragraph.
    pub fn alignment(&mut self, alignment: ParagraphAlignment) -> &mut Self {
        if let ShapeType::TextBox {
            alignment: ref mut a,
            ..
        } = self.shape_type
        {
            *a = alignment;
        }
        self
    }

    /// Builder method: vertical anchoring of the text within the box.
    pub fn vertical_anchor(&mut self, anchor: VerticalAnchor) -> &mut Self {
        if let ShapeType::TextBox {
            anchor: ref mut a, ..
        } = self.shape_type
        {
            *a = anchor;
        }
        self
    }

    /// Builder method: wrap text at the box width.
    pub fn word_wrap(&mut self, wrap: bool) -> &mut Self {
        if let ShapeType::TextBox {
            word_wrap: ref mut w,
            ..
        } = self.shape_type
        {
            *w = wrap;
        }
        self
    }

    /// Paragraph texts if this shape is a text box.
    pub fn paragraphs(&self) -> Option<&[String]> {
        match &self.shape_type {
            ShapeType::TextBox { paragraphs, .. } => Some(paragraphs),
            ShapeType::Picture { .. } => None,
        }
    }

    pub fn rect(&self) -> Rect {
        match &self.shape_type {
            ShapeType::TextBox { rect, .. } | ShapeType::Picture { rect, .. } => *rect,
        }
    }

    /// Get image data if this shape is a picture.
    pub(crate) fn get_image_data(&self) -> Option<(&Arc<[u8]>, ImageFormat)> {
        match &self.shape_type {
            ShapeType::Picture { data, format, .. } => Some((data, *format)),
            ShapeType::TextBox { .. } => None,
        }
    }

    /// Generate XML for this shape.
    ///
    /// Pictures need the rId of their image relationship.
    pub(crate) fn to_xml(&self, xml: &mut String, image_rel_id: Option<&str>) -> Result<()> {
        match &self.shape_type {
            ShapeType::TextBox {
                paragraphs,
                rect,
                format,
                alignment,
                anchor,
                word_wrap,
            } => {
                xml.push_str("<p:sp><p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="TextBox {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#);

                xml.push_str("<p:spPr>");
                rect.write_xfrm(xml)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
                xml.push_str("</p:spPr>");

                xml.push_str("<p:txBody>");
                write!(
                    xml,
                    r#"<a:bodyPr wrap="{}" rtlCol="0" anchor="{}"><a:spAutoFit/></a:bodyPr>"#,
                    if *word_wrap { "square" } else { "none" },
                    anchor.as_str()
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("<a:lstStyle/>");

                if paragraphs.is_empty() {
                    write_paragraph(xml, "", format, *alignment)?;
                }
                for paragraph in paragraphs {
                    write_paragraph(xml, paragraph, format, *alignment)?;
                }

                xml.push_str("</p:txBody></p:sp>");
            },
            ShapeType::Picture {
                rect, description, ..
            } => {
                let rid = image_rel_id.ok_or_else(|| {
                    OoxmlError::InvalidFormat(format!(
                        "picture {} has no image relationship",
                        self.shape_id
                    ))
                })?;

                xml.push_str("<p:pic><p:nvPicPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
                    self.shape_id,
                    self.shape_id - 1,
                    escape_xml(description)
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#);

                write!(
                    xml,
                    r#"<p:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
                    rid
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;

                xml.push_str("<p:spPr>");
                rect.write_xfrm(xml)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr></p:pic>");
            },
        }

        Ok(())
    }
}

/// Write one `<a:p>`; soft line breaks in `text` become `<a:br/>`.
fn write_paragraph(
    xml: &mut String,
    text: &str,
    format: &TextFormat,
    alignment: ParagraphAlignment,
) -> Result<()> {
    write!(xml, r#"<a:p><a:pPr algn="{}"/>"#, alignment.as_str())
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

    if text.is_empty() {
        format.write_properties(xml, "a:endParaRPr")?;
        xml.push_str("</a:p>");
        return Ok(());
    }

    for (index, line) in text.split(LINE_BREAK).enumerate() {
        if index > 0 {
            xml.push_str("<a:br>");
            format.write_properties(xml, "a:rPr")?;
            xml.push_str("</a:br>");
        }
        if line.is_empty() {
            continue;
        }
        xml.push_str("<a:r>");
        format.write_properties(xml, "a:rPr")?;
        write!(xml, "<a:t>{}</a:t>", escape_xml(&xml_safe(line)))
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("</a:r>");
    }

    xml.push_str("</a:p>");
    Ok(())
}

/// Drop characters XML 1.0 cannot carry (C0 controls other than tab, LF, CR).
fn xml_safe(text: &str) -> std::borrow::Cow<'_, str> {
    let allowed = |c: char| c >= ' ' || matches!(c, '\t' | '\n' | '\r');
    if text.chars().all(allowed) {
        std::borrow::Cow::Borrowed(text)
    } else {
        std::borrow::Cow::Owned(text.chars().filter(|&c| allowed(c)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect::new(457200, 914400, 11274552, 5029200);

    #[test]
    fn test_text_box_xml() {
        let mut shape = MutableShape::new_text_box(
            2,
            vec!["Amazing grace".to_string(), "R&B <live>".to_string()],
            RECT,
        );
        shape
            .set_text_format(TextFormat::new().size(44.0).bold(true).color("FFFFFF"))
            .alignment(ParagraphAlignment::Center)
            .vertical_anchor(VerticalAnchor::Middle)
            .word_wrap(true);

        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();

        assert!(xml.starts_with("<p:sp>"));
        assert!(xml.contains(r#"<p:cNvPr id="2" name="TextBox 1"/>"#));
        assert!(xml.contains(r#"<a:off x="457200" y="914400"/><a:ext cx="11274552" cy="5029200"/>"#));
        assert!(xml.contains(r#"<a:bodyPr wrap="square" rtlCol="0" anchor="ctr">"#));
        assert_eq!(xml.matches("<a:p>").count(), 2);
        assert_eq!(xml.matches(r#"<a:pPr algn="ctr"/>"#).count(), 2);
        assert!(xml.contains("<a:t>R&amp;B &lt;live&gt;</a:t>"));
        assert!(xml.contains(r#"sz="4400" b="1""#));
    }

    #[test]
    fn test_empty_paragraph_has_no_run() {
        let shape = MutableShape::new_text_box(3, vec![String::new()], RECT);
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();

        assert!(!xml.contains("<a:r>"));
        assert!(xml.contains("<a:endParaRPr"));
    }

    #[test]
    fn test_line_breaks_and_control_chars() {
        let shape = MutableShape::new_text_box(2, vec!["one\u{000B}two\u{0007}".to_string()], RECT);
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();

        assert!(xml.contains("<a:t>one</a:t></a:r><a:br>"));
        assert!(xml.contains("<a:t>two</a:t>"));
        assert!(!xml.contains('\u{000B}'));
        assert!(!xml.contains('\u{0007}'));
    }

    #[test]
    fn test_picture_xml_requires_rel_id() {
        let data: Arc<[u8]> = Arc::from(&[0x89u8, b'P', b'N', b'G'][..]);
        let shape = MutableShape::new_picture(4, data, ImageFormat::Png, RECT, "Logo".to_string());

        let mut xml = String::new();
        assert!(shape.to_xml(&mut xml, None).is_err());

        let mut xml = String::new();
        shape.to_xml(&mut xml, Some("rId2")).unwrap();
        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(xml.contains(r#"descr="Logo""#));
        assert!(shape.get_image_data().is_some());
        assert!(shape.paragraphs().is_none());
    }
}
