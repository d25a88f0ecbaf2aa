/// Slide part.
///
/// Corresponds to `/ppt/slides/slideN.xml` in the package.
use crate::common::xml::resolve_entity;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use memchr::memmem;
use quick_xml::Reader;
use quick_xml::events::Event;

/// Character written for a soft line break (`<a:br/>`) inside a paragraph.
pub const LINE_BREAK: char = '\u{000B}';

/// A slide part.
pub struct SlidePart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
}

/// Where the scanner currently is relative to the shape being collected.
struct ShapeScan {
    /// Depth of the `<p:sp>` start tag
    depth: usize,
    has_text_body: bool,
    paragraphs: Vec<String>,
    /// Paragraph being accumulated, if inside `<a:p>`
    current: Option<String>,
    in_text: bool,
}

impl<'a> SlidePart<'a> {
    #[inline]
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { part }
    }

    /// Get the underlying OPC part.
    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    /// Paragraph texts of every top-level text-bearing shape, in shape-tree order.
    ///
    /// Only `<p:sp>` elements that are direct children of `<p:spTree>` and
    /// carry a `<p:txBody>` contribute; grouped shapes, pictures and graphic
    /// frames are skipped. A paragraph's text is the concatenation of its
    /// `<a:t>` contents, with `<a:br/>` written as [`LINE_BREAK`]. Text is
    /// returned untrimmed and empty paragraphs are kept.
    pub fn paragraphs(&self) -> Result<Vec<Vec<String>>> {
        let xml = self.part.blob();
        if memmem::find(xml, b"txBody").is_none() {
            return Ok(Vec::new());
        }

        let mut reader = Reader::from_reader(xml);
        let mut shapes = Vec::new();
        let mut depth = 0usize;
        let mut sp_tree_depth: Option<usize> = None;
        let mut scan: Option<ShapeScan> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    depth += 1;
                    let name = e.local_name();
                    match scan.as_mut() {
                        Some(s) => match name.as_ref() {
                            b"txBody" => s.has_text_body = true,
                            b"p" if s.has_text_body => s.current = Some(String::new()),
                            b"t" if s.current.is_some() => s.in_text = true,
                            b"br" => {
                                if let Some(current) = s.current.as_mut() {
                                    current.push(LINE_BREAK);
                                }
                            },
                            _ => {},
                        },
                        None => match name.as_ref() {
                            b"spTree" if sp_tree_depth.is_none() => sp_tree_depth = Some(depth),
                            b"sp" if sp_tree_depth.is_some_and(|d| d + 1 == depth) => {
                                scan = Some(ShapeScan {
                                    depth,
                                    has_text_body: false,
                                    paragraphs: Vec::new(),
                                    current: None,
                                    in_text: false,
                                });
                            },
                            _ => {},
                        },
                    }
                },
                Ok(Event::Empty(e)) => {
                    if let Some(s) = scan.as_mut() {
                        match e.local_name().as_ref() {
                            b"br" => {
                                if let Some(current) = s.current.as_mut() {
                                    current.push(LINE_BREAK);
                                }
                            },
                            b"p" if s.has_text_body => s.paragraphs.push(String::new()),
                            b"txBody" => s.has_text_body = true,
                            _ => {},
                        }
                    }
                },
                Ok(Event::Text(e)) => {
                    if let Some(current) = in_text_run(&mut scan) {
                        let text = std::str::from_utf8(e.as_ref())
                            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        current.push_str(text);
                    }
                },
                Ok(Event::CData(e)) => {
                    if let Some(current) = in_text_run(&mut scan) {
                        let text = std::str::from_utf8(e.as_ref())
                            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        current.push_str(text);
                    }
                },
                Ok(Event::GeneralRef(e)) => {
                    if let Some(current) = in_text_run(&mut scan) {
                        let entity = std::str::from_utf8(e.as_ref())
                            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        match resolve_entity(entity) {
                            Some(c) => current.push(c),
                            None => {
                                return Err(OoxmlError::Xml(format!(
                                    "Unknown entity &{};",
                                    entity
                                )));
                            },
                        }
                    }
                },
                Ok(Event::End(e)) => {
                    let mut shape_closed = false;
                    if let Some(s) = scan.as_mut() {
                        match e.local_name().as_ref() {
                            b"t" => s.in_text = false,
                            b"p" => {
                                if let Some(paragraph) = s.current.take() {
                                    s.paragraphs.push(paragraph);
                                }
                            },
                            b"sp" => shape_closed = s.depth == depth,
                            _ => {},
                        }
                    }
                    if shape_closed
                        && let Some(done) = scan.take()
                        && done.has_text_body
                    {
                        shapes.push(done.paragraphs);
                    }
                    depth = depth.saturating_sub(1);
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(shapes)
    }

    /// All slide text: paragraphs joined by newlines, shapes separated by a blank line.
    pub fn extract_text(&self) -> Result<String> {
        let shapes = self.paragraphs()?;
        let text = shapes
            .iter()
            .map(|paragraphs| paragraphs.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(text)
    }
}

/// The paragraph buffer to append to, if the scanner is inside `<a:t>`.
#[inline]
fn in_text_run(scan: &mut Option<ShapeScan>) -> Option<&mut String> {
    let s = scan.as_mut()?;
    if !s.in_text {
        return None;
    }
    s.current.as_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use crate::ooxml::opc::{PackURI, XmlPart};

    fn slide(body: &str) -> XmlPart {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<p:cSld><p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:grpSpPr/>
{}
</p:spTree></p:cSld></p:sld>"#,
            body
        );
        XmlPart::new(
            PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            ct::PML_SLIDE.to_string(),
            xml.into_bytes(),
        )
    }

    fn text_shape(paragraphs: &str) -> String {
        format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="TextBox 1"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
            paragraphs
        )
    }

    #[test]
    fn test_runs_are_joined_per_paragraph() {
        let part = slide(&text_shape(
            r#"<a:p><a:r><a:t>Amazing </a:t></a:r><a:r><a:rPr b="1"/><a:t>grace</a:t></a:r></a:p><a:p><a:r><a:t>How sweet</a:t></a:r></a:p>"#,
        ));
        let paragraphs = SlidePart::from_part(&part).paragraphs().unwrap();
        assert_eq!(paragraphs, vec![vec!["Amazing grace", "How sweet"]]);
    }

    #[test]
    fn test_entities_and_breaks() {
        let part = slide(&text_shape(
            r#"<a:p><a:r><a:t>Rock &amp; Roll&#x2019;s</a:t></a:r><a:br/><a:r><a:t>&lt;refrain&gt;</a:t></a:r></a:p>"#,
        ));
        let paragraphs = SlidePart::from_part(&part).paragraphs().unwrap();
        assert_eq!(paragraphs[0][0], "Rock & Roll\u{2019}s\u{000B}<refrain>");
    }

    #[test]
    fn test_empty_paragraphs_kept_untrimmed() {
        let part = slide(&text_shape(
            r#"<a:p><a:endParaRPr/></a:p><a:p/><a:p><a:r><a:t>  padded  </a:t></a:r></a:p>"#,
        ));
        let paragraphs = SlidePart::from_part(&part).paragraphs().unwrap();
        assert_eq!(paragraphs, vec![vec!["", "", "  padded  "]]);
    }

    #[test]
    fn test_shape_order_and_non_text_shapes() {
        let body = format!(
            r#"{}<p:pic><p:nvPicPr><p:cNvPr id="3" name="Picture"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/></p:blipFill><p:spPr/></p:pic><p:sp><p:nvSpPr><p:cNvPr id="4" name="Rect"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/></p:sp>{}"#,
            text_shape("<a:p><a:r><a:t>first</a:t></a:r></a:p>"),
            text_shape("<a:p><a:fld id=\"x\" type=\"slidenum\"><a:t>second</a:t></a:fld></a:p>"),
        );
        let part = slide(&body);
        let paragraphs = SlidePart::from_part(&part).paragraphs().unwrap();
        assert_eq!(paragraphs, vec![vec!["first"], vec!["second"]]);
    }

    #[test]
    fn test_grouped_shapes_skipped() {
        let body = format!(
            r#"<p:grpSp><p:nvGrpSpPr><p:cNvPr id="5" name="Group"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:grpSp>{}"#,
            text_shape("<a:p><a:r><a:t>inside group</a:t></a:r></a:p>"),
            text_shape("<a:p><a:r><a:t>top level</a:t></a:r></a:p>"),
        );
        let part = slide(&body);
        let paragraphs = SlidePart::from_part(&part).paragraphs().unwrap();
        assert_eq!(paragraphs, vec![vec!["top level"]]);
    }

    #[test]
    fn test_no_text_bodies() {
        let part = slide("");
        let slide_part = SlidePart::from_part(&part);
        assert!(slide_part.paragraphs().unwrap().is_empty());
        assert_eq!(slide_part.extract_text().unwrap(), "");
    }

    #[test]
    fn test_extract_text() {
        let body = format!(
            "{}{}",
            text_shape("<a:p><a:r><a:t>a</a:t></a:r></a:p><a:p><a:r><a:t>b</a:t></a:r></a:p>"),
            text_shape("<a:p><a:r><a:t>c</a:t></a:r></a:p>"),
        );
        let part = slide(&body);
        assert_eq!(SlidePart::from_part(&part).extract_text().unwrap(), "a\nb\n\nc");
    }
}
