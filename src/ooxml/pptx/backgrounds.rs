//! Slide background fills.

use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

/// Slide background configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlideBackground {
    /// Inherit the master's background
    #[default]
    None,
    /// Solid color background
    Solid {
        /// RGB color as `RRGGBB`
        color: String,
    },
}

impl SlideBackground {
    /// Create a solid color background.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use songdeck::ooxml::pptx::SlideBackground;
    ///
    /// let bg = SlideBackground::solid("000000");
    /// assert_ne!(bg, SlideBackground::None);
    /// ```
    pub fn solid(color: impl Into<String>) -> Self {
        SlideBackground::Solid {
            color: color.into(),
        }
    }

    /// Append the `<p:bg>` element, if any, to `xml`.
    ///
    /// Must be written as the first child of `<p:cSld>`.
    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        match self {
            SlideBackground::None => Ok(()),
            SlideBackground::Solid { color } => write!(
                xml,
                r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
                escape_xml(color)
            )
            .map_err(|e| OoxmlError::Xml(e.to_string())),
        }
    }
}
