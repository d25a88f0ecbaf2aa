/// Slide types and implementation for PPTX presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::backgrounds::SlideBackground;
use crate::ooxml::pptx::format::ImageFormat;
use std::sync::Arc;

use super::relmap::RelationshipMapper;
use super::shape::{MutableShape, Rect, ShapeType};

/// A mutable slide in a presentation.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID as listed in `p:sldIdLst`
    pub(crate) slide_id: u32,
    /// Shapes in z-order, first is bottom-most
    pub(crate) shapes: Vec<MutableShape>,
    pub(crate) background: SlideBackground,
    pub(crate) modified: bool,
}

impl MutableSlide {
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
            background: SlideBackground::None,
            modified: false,
        }
    }

    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Set the slide background fill.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use songdeck::ooxml::pptx::{MutablePresentation, SlideBackground};
    ///
    /// let mut pres = MutablePresentation::widescreen();
    /// let slide = pres.add_slide();
    /// slide.set_background(SlideBackground::solid("000000"));
    /// ```
    pub fn set_background(&mut self, background: SlideBackground) {
        self.background = background;
        self.modified = true;
    }

    pub fn background(&self) -> &SlideBackground {
        &self.background
    }

    /// Next free shape ID; 1 is the shape tree itself.
    fn next_shape_id(&self) -> u32 {
        (self.shapes.len() + 2) as u32
    }

    /// Add a single-paragraph text box with default formatting.
    pub fn add_text_box(
        &mut self,
        text: &str,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> &mut MutableShape {
        self.add_paragraphs_box([text], x, y, width, height)
    }

    /// Add a text box holding one paragraph per item.
    ///
    /// The returned shape can be styled with its builder methods.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use songdeck::ooxml::pptx::{
    ///     MutablePresentation, ParagraphAlignment, TextFormat, VerticalAnchor,
    /// };
    ///
    /// let mut pres = MutablePresentation::widescreen();
    /// let slide = pres.add_slide();
    /// slide
    ///     .add_paragraphs_box(["Line one", "Line two"], 457200, 914400, 11274552, 5029200)
    ///     .set_text_format(TextFormat::new().font("Calibri").size(44.0).bold(true))
    ///     .alignment(ParagraphAlignment::Center)
    ///     .vertical_anchor(VerticalAnchor::Middle)
    ///     .word_wrap(true);
    /// assert_eq!(slide.shape_count(), 1);
    /// ```
    pub fn add_paragraphs_box<I, S>(
        &mut self,
        paragraphs: I,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> &mut MutableShape
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let shape_id = self.next_shape_id();
        let paragraphs = paragraphs.into_iter().map(Into::into).collect();
        self.push_shape(MutableShape::new_text_box(
            shape_id,
            paragraphs,
            Rect::new(x, y, width, height),
        ))
    }

    /// Add a picture from encoded image bytes (PNG, JPEG, GIF, BMP or TIFF).
    ///
    /// The image is stored once per distinct content when the presentation is
    /// written, however many slides use it.
    pub fn add_picture_from_bytes(
        &mut self,
        data: impl Into<Arc<[u8]>>,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: Option<String>,
    ) -> Result<()> {
        let data = data.into();
        let format = ImageFormat::detect_from_bytes(&data)
            .ok_or_else(|| OoxmlError::InvalidFormat("Unknown image format".to_string()))?;

        let shape_id = self.next_shape_id();
        let desc = description.unwrap_or_else(|| "Picture".to_string());
        self.push_shape(MutableShape::new_picture(
            shape_id,
            data,
            format,
            Rect::new(x, y, width, height),
            desc,
        ));
        Ok(())
    }

    fn push_shape(&mut self, shape: MutableShape) -> &mut MutableShape {
        self.modified = true;
        self.shapes.push(shape);
        let last = self.shapes.len() - 1;
        &mut self.shapes[last]
    }

    pub fn shapes(&self) -> &[MutableShape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// All pictures on this slide in shape order.
    pub(crate) fn collect_images(&self) -> Vec<(&Arc<[u8]>, ImageFormat)> {
        self.shapes
            .iter()
            .filter_map(MutableShape::get_image_data)
            .collect()
    }

    /// Generate slide XML content with relationship IDs from the mapper.
    pub(crate) fn to_xml_with_rels(
        &self,
        slide_index: usize,
        rel_mapper: &RelationshipMapper,
    ) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
        );

        xml.push_str("<p:cSld>");

        // p:bg must precede p:spTree
        self.background.write_xml(&mut xml)?;

        xml.push_str("<p:spTree>");
        xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
        xml.push_str(r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#);

        let mut image_counter = 0;
        for shape in &self.shapes {
            let rid = match shape.shape_type {
                ShapeType::Picture { .. } => {
                    let rid = rel_mapper.get_image_id(slide_index, image_counter);
                    image_counter += 1;
                    rid
                },
                ShapeType::TextBox { .. } => None,
            };
            shape.to_xml(&mut xml, rid)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}
