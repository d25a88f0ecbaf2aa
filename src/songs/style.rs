//! Look and layout shared by every generated slide.

use super::{CombineError, HexColor, Result};
use crate::common::unit::inches_to_emu;
use crate::ooxml::pptx::{ImageFormat, Rect};
use std::io::Cursor;
use std::sync::Arc;

/// Body lines per generated slide.
pub const LINES_PER_SLIDE: usize = 8;
/// Body text size in points.
pub const BODY_FONT_SIZE: f64 = 44.0;
/// Footer text size in points.
pub const FOOTER_FONT_SIZE: f64 = 20.0;
pub const FONT_FACE: &str = "Calibri";
/// File name used when the caller does not pick one.
pub const DEFAULT_OUTPUT_NAME: &str = "combined_songs.pptx";

/// Per-run styling: colors plus optional background and logo images.
///
/// Images are validated on the way in, so composing a slide never has to
/// reject them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    font_color: HexColor,
    background_color: HexColor,
    background_image: Option<Arc<[u8]>>,
    logo: Option<Logo>,
}

/// Logo picture together with its size in pixels, which fixes its aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    data: Arc<[u8]>,
    width_px: u32,
    height_px: u32,
}

impl Logo {
    /// Check the format and read the pixel size from the image header.
    ///
    /// # Errors
    ///
    /// - [`CombineError::UnsupportedImage`] for an unknown format or a zero size
    /// - [`CombineError::ImageDimensions`] when the header cannot be decoded
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self> {
        const WHAT: &str = "logo";
        let data = checked_image(bytes.into(), WHAT)?;
        let (width_px, height_px) = image::ImageReader::new(Cursor::new(&data[..]))
            .with_guessed_format()
            .map_err(|e| CombineError::ImageDimensions {
                what: WHAT,
                source: e.into(),
            })?
            .into_dimensions()
            .map_err(|source| CombineError::ImageDimensions { what: WHAT, source })?;
        if width_px == 0 || height_px == 0 {
            return Err(CombineError::UnsupportedImage(WHAT));
        }
        Ok(Self {
            data,
            width_px,
            height_px,
        })
    }

    pub fn data(&self) -> &Arc<[u8]> {
        &self.data
    }

    /// (width, height) in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }
}

impl StyleConfig {
    pub fn new(font_color: HexColor, background_color: HexColor) -> Self {
        Self {
            font_color,
            background_color,
            background_image: None,
            logo: None,
        }
    }

    /// Attach a full-slide background picture.
    ///
    /// # Errors
    ///
    /// [`CombineError::UnsupportedImage`] when the bytes are not a PNG, JPEG,
    /// GIF, BMP or TIFF image.
    pub fn with_background_image(mut self, bytes: impl Into<Arc<[u8]>>) -> Result<Self> {
        self.background_image = Some(checked_image(bytes.into(), "background image")?);
        Ok(self)
    }

    /// Attach a logo drawn in the bottom-left corner of content slides.
    ///
    /// # Errors
    ///
    /// See [`Logo::from_bytes`].
    pub fn with_logo(mut self, bytes: impl Into<Arc<[u8]>>) -> Result<Self> {
        self.logo = Some(Logo::from_bytes(bytes)?);
        Ok(self)
    }

    pub fn font_color(&self) -> HexColor {
        self.font_color
    }

    pub fn background_color(&self) -> HexColor {
        self.background_color
    }

    pub fn background_image(&self) -> Option<&Arc<[u8]>> {
        self.background_image.as_ref()
    }

    pub fn logo(&self) -> Option<&Logo> {
        self.logo.as_ref()
    }
}

impl Default for StyleConfig {
    /// White text on black.
    fn default() -> Self {
        Self::new(HexColor::WHITE, HexColor::BLACK)
    }
}

fn checked_image(bytes: Arc<[u8]>, what: &'static str) -> Result<Arc<[u8]>> {
    match ImageFormat::detect_from_bytes(&bytes) {
        Some(_) => Ok(bytes),
        None => Err(CombineError::UnsupportedImage(what)),
    }
}

/// Canvas size and the boxes content slides are laid out in, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideGeometry {
    pub width: i64,
    pub height: i64,
    pub body: Rect,
    pub footer: Rect,
    /// Top-left corner of the logo
    pub logo_x: i64,
    pub logo_y: i64,
    /// Logo width; its height follows the picture's aspect ratio
    pub logo_width: i64,
}

impl SlideGeometry {
    /// 13.33 in × 7.5 in.
    pub fn widescreen() -> Self {
        Self {
            width: inches_to_emu(13.33),
            height: inches_to_emu(7.5),
            body: Rect::new(
                inches_to_emu(0.5),
                inches_to_emu(1.0),
                inches_to_emu(12.33),
                inches_to_emu(5.5),
            ),
            footer: Rect::new(
                inches_to_emu(0.5),
                inches_to_emu(6.9),
                inches_to_emu(12.33),
                inches_to_emu(0.5),
            ),
            logo_x: inches_to_emu(0.2),
            logo_y: inches_to_emu(6.4),
            logo_width: inches_to_emu(1.0),
        }
    }

    /// Box for `logo`: fixed width and corner, height scaled to keep the
    /// picture undistorted.
    pub fn logo_rect(&self, logo: &Logo) -> Rect {
        let (width_px, height_px) = logo.pixel_size();
        let height = self.logo_width * i64::from(height_px) / i64::from(width_px.max(1));
        Rect::new(self.logo_x, self.logo_y, self.logo_width, height)
    }

    /// The whole canvas, used for background pictures.
    pub fn canvas(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

impl Default for SlideGeometry {
    fn default() -> Self {
        Self::widescreen()
    }
}
