//! Format types for PPTX presentations.

use crate::common::unit::pt_to_centipoints;
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use std::fmt::Write as FmtWrite;

/// Image format types supported by PPTX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Content type of the media part holding an image of this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => ct::PNG,
            Self::Jpeg => ct::JPEG,
            Self::Gif => ct::GIF,
            Self::Bmp => ct::BMP,
            Self::Tiff => ct::TIFF,
        }
    }

    /// File extension used for the media partname.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Detect image format from bytes (magic number detection).
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        // PNG: 89 50 4E 47
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // GIF8
        if bytes.starts_with(b"GIF8") {
            return Some(Self::Gif);
        }

        // TIFF: II*\0 (little-endian) or MM\0* (big-endian)
        if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some(Self::Tiff);
        }

        // BM plus a file size; two bytes alone is too weak a signature
        if bytes.len() >= 14 && bytes.starts_with(b"BM") {
            return Some(Self::Bmp);
        }

        None
    }
}

/// Run-level text formatting (`<a:rPr>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFormat {
    /// Latin font face
    pub font: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    /// Text color as `RRGGBB`
    pub color: Option<String>,
}

impl TextFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn size(mut self, points: f64) -> Self {
        self.size = Some(points);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn color(mut self, rgb: impl Into<String>) -> Self {
        self.color = Some(rgb.into());
        self
    }

    /// Append a run properties element for this format.
    ///
    /// `tag` is `a:rPr` for a run or `a:endParaRPr` for an empty paragraph.
    pub(crate) fn write_properties(&self, xml: &mut String, tag: &str) -> Result<()> {
        let xml_err = |e: std::fmt::Error| OoxmlError::Xml(e.to_string());

        write!(xml, r#"<{} lang="en-US""#, tag).map_err(xml_err)?;
        if let Some(size) = self.size {
            write!(xml, r#" sz="{}""#, pt_to_centipoints(size)).map_err(xml_err)?;
        }
        if let Some(bold) = self.bold {
            write!(xml, r#" b="{}""#, u8::from(bold)).map_err(xml_err)?;
        }
        if let Some(italic) = self.italic {
            write!(xml, r#" i="{}""#, u8::from(italic)).map_err(xml_err)?;
        }
        xml.push_str(r#" dirty="0""#);

        if self.color.is_none() && self.font.is_none() {
            xml.push_str("/>");
            return Ok(());
        }

        xml.push('>');
        if let Some(color) = &self.color {
            write!(
                xml,
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                escape_xml(color)
            )
            .map_err(xml_err)?;
        }
        if let Some(font) = &self.font {
            write!(xml, r#"<a:latin typeface="{}"/>"#, escape_xml(font)).map_err(xml_err)?;
        }
        write!(xml, "</{}>", tag).map_err(xml_err)
    }
}

/// Horizontal paragraph alignment (`algn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl ParagraphAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
            Self::Justify => "just",
        }
    }
}

/// Vertical anchoring of text within its frame (`anchor` on `<a:bodyPr>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAnchor {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "t",
            Self::Middle => "ctr",
            Self::Bottom => "b",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_image_formats() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(ImageFormat::detect_from_bytes(&png), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::detect_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::detect_from_bytes(b"GIF89a"), Some(ImageFormat::Gif));
        assert_eq!(
            ImageFormat::detect_from_bytes(b"MM\x00\x2A\x00\x00\x00\x08"),
            Some(ImageFormat::Tiff)
        );
        assert_eq!(
            ImageFormat::detect_from_bytes(b"BM\x46\x00\x00\x00\x00\x00\x00\x00\x36\x00\x00\x00"),
            Some(ImageFormat::Bmp)
        );
        assert_eq!(ImageFormat::detect_from_bytes(b"BM"), None);
        assert_eq!(ImageFormat::detect_from_bytes(b"<svg/>"), None);
        assert_eq!(ImageFormat::detect_from_bytes(&[]), None);
    }

    #[test]
    fn test_run_properties_full() {
        let format = TextFormat::new()
            .font("Calibri")
            .size(44.0)
            .bold(true)
            .color("FFFFFF");
        let mut xml = String::new();
        format.write_properties(&mut xml, "a:rPr").unwrap();

        assert_eq!(
            xml,
            r#"<a:rPr lang="en-US" sz="4400" b="1" dirty="0"><a:solidFill><a:srgbClr val="FFFFFF"/></a:solidFill><a:latin typeface="Calibri"/></a:rPr>"#
        );
    }

    #[test]
    fn test_run_properties_empty() {
        let mut xml = String::new();
        TextFormat::default()
            .write_properties(&mut xml, "a:endParaRPr")
            .unwrap();
        assert_eq!(xml, r#"<a:endParaRPr lang="en-US" dirty="0"/>"#);
    }

    #[test]
    fn test_alignment_values() {
        assert_eq!(ParagraphAlignment::Center.as_str(), "ctr");
        assert_eq!(VerticalAnchor::Middle.as_str(), "ctr");
        assert_eq!(VerticalAnchor::default().as_str(), "t");
    }
}
