//! Rendering pages onto slides of the output deck.

use super::{
    Page, Result, SlideGeometry, StyleConfig, BODY_FONT_SIZE, FONT_FACE, FOOTER_FONT_SIZE,
};
use crate::ooxml::pptx::{
    MutablePresentation, MutableSlide, ParagraphAlignment, SlideBackground, TextFormat,
    VerticalAnchor,
};

/// Append a content slide for `page`.
///
/// Shapes are stacked bottom to top: background picture, body, footer, logo.
pub fn compose_page(
    deck: &mut MutablePresentation,
    page: &Page<'_>,
    style: &StyleConfig,
    geometry: &SlideGeometry,
) -> Result<()> {
    let slide = start_slide(deck, style, geometry)?;
    let color = style.font_color().to_hex();

    let body = geometry.body;
    slide
        .add_paragraphs_box(
            page.body.iter().map(String::as_str),
            body.x,
            body.y,
            body.width,
            body.height,
        )
        .set_text_format(text_format(BODY_FONT_SIZE, &color))
        .alignment(ParagraphAlignment::Center)
        .vertical_anchor(VerticalAnchor::Middle)
        .word_wrap(true);

    let footer = geometry.footer;
    slide
        .add_text_box(page.footer, footer.x, footer.y, footer.width, footer.height)
        .set_text_format(text_format(FOOTER_FONT_SIZE, &color))
        .alignment(ParagraphAlignment::Center)
        .word_wrap(true);

    if let Some(logo) = style.logo() {
        let rect = geometry.logo_rect(logo);
        slide.add_picture_from_bytes(
            logo.data().clone(),
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            Some("Logo".to_string()),
        )?;
    }

    Ok(())
}

/// Append a blank slide marking the end of a song.
pub fn compose_separator(
    deck: &mut MutablePresentation,
    style: &StyleConfig,
    geometry: &SlideGeometry,
) -> Result<()> {
    start_slide(deck, style, geometry)?;
    Ok(())
}

/// New slide with the run's background fill and picture.
fn start_slide<'d>(
    deck: &'d mut MutablePresentation,
    style: &StyleConfig,
    geometry: &SlideGeometry,
) -> Result<&'d mut MutableSlide> {
    let slide = deck.add_slide();
    slide.set_background(SlideBackground::solid(style.background_color().to_hex()));

    if let Some(image) = style.background_image() {
        let canvas = geometry.canvas();
        slide.add_picture_from_bytes(
            image.clone(),
            canvas.x,
            canvas.y,
            canvas.width,
            canvas.height,
            Some("Background".to_string()),
        )?;
    }

    Ok(slide)
}

fn text_format(size: f64, color: &str) -> TextFormat {
    TextFormat::new()
        .font(FONT_FACE)
        .size(size)
        .bold(true)
        .color(color)
}
