/// Presentation writer for PPTX.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, namespace, relationship_type as rt};
use crate::ooxml::opc::{BlobPart, OpcPackage, PackURI, PackageWriter, Part, XmlPart};
use crate::ooxml::pptx::template;
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::path::Path;

use super::relmap::RelationshipMapper;
use super::slide::MutableSlide;

/// First ID handed to slides in `p:sldIdLst`; lower values are reserved.
const FIRST_SLIDE_ID: u32 = 256;

/// A mutable PowerPoint presentation for writing.
///
/// # Examples
///
/// ```rust,no_run
/// use songdeck::ooxml::pptx::{MutablePresentation, SlideBackground};
///
/// let mut pres = MutablePresentation::widescreen();
/// let slide = pres.add_slide();
/// slide.set_background(SlideBackground::solid("000000"));
/// slide.add_text_box("Hello", 914400, 914400, 5486400, 914400);
/// pres.save("hello.pptx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct MutablePresentation {
    pub(crate) slides: Vec<MutableSlide>,
    /// Slide width in EMUs (914400 EMU = 1 inch)
    slide_width: i64,
    slide_height: i64,
}

impl MutablePresentation {
    /// Create a new empty presentation with default dimensions.
    ///
    /// Default size is 10" x 7.5" (standard 4:3 aspect ratio).
    pub fn new() -> Self {
        Self::with_size(9_144_000, 6_858_000)
    }

    /// Create a new empty 16:9 presentation (13.333" x 7.5").
    pub fn widescreen() -> Self {
        Self::with_size(12_192_000, 6_858_000)
    }

    /// Create a new empty presentation with a custom slide size in EMUs.
    pub fn with_size(slide_width: i64, slide_height: i64) -> Self {
        Self {
            slides: Vec::new(),
            slide_width,
            slide_height,
        }
    }

    /// Append a new blank slide.
    pub fn add_slide(&mut self) -> &mut MutableSlide {
        let slide_id = FIRST_SLIDE_ID + self.slides.len() as u32;
        self.slides.push(MutableSlide::new(slide_id));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[MutableSlide] {
        &self.slides
    }

    /// Get a mutable reference to a slide by index (0-based).
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut MutableSlide> {
        self.slides.get_mut(index)
    }

    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Serialize the presentation to .pptx bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let package = self.to_opc_package()?;
        Ok(PackageWriter::to_bytes(&package)?)
    }

    /// Write the presentation to a .pptx file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let package = self.to_opc_package()?;
        PackageWriter::write(path, &package)?;
        Ok(())
    }

    /// Build the in-memory package: template parts, slides and media.
    ///
    /// Identical image bytes are stored as a single media part shared by
    /// every slide that shows them.
    fn to_opc_package(&self) -> Result<OpcPackage> {
        let mut package = OpcPackage::new();

        let pres_uri = pack_uri("/ppt/presentation.xml")?;
        let master_uri = pack_uri("/ppt/slideMasters/slideMaster1.xml")?;
        let layout_uri = pack_uri("/ppt/slideLayouts/slideLayout1.xml")?;
        let theme_uri = pack_uri("/ppt/theme/theme1.xml")?;
        let pres_props_uri = pack_uri("/ppt/presProps.xml")?;
        let view_props_uri = pack_uri("/ppt/viewProps.xml")?;
        let table_styles_uri = pack_uri("/ppt/tableStyles.xml")?;
        let core_uri = pack_uri("/docProps/core.xml")?;
        let app_uri = pack_uri("/docProps/app.xml")?;

        let mut master = xml_part(
            &master_uri,
            ct::PML_SLIDE_MASTER,
            template::default_slide_master_xml(),
        );
        // The master template refers to its layout as rId1
        master.relate_to(&layout_uri, rt::SLIDE_LAYOUT);
        master.relate_to(&theme_uri, rt::THEME);

        let mut layout = xml_part(
            &layout_uri,
            ct::PML_SLIDE_LAYOUT,
            template::blank_slide_layout_xml(),
        );
        layout.relate_to(&master_uri, rt::SLIDE_MASTER);

        let mut pres_part = xml_part(&pres_uri, ct::PML_PRESENTATION_MAIN, "");
        let master_rid = pres_part.relate_to(&master_uri, rt::SLIDE_MASTER);
        pres_part.relate_to(&pres_props_uri, rt::PRES_PROPS);
        pres_part.relate_to(&view_props_uri, rt::VIEW_PROPS);
        pres_part.relate_to(&theme_uri, rt::THEME);
        pres_part.relate_to(&table_styles_uri, rt::TABLE_STYLES);

        let mut rel_mapper = RelationshipMapper::new();
        let mut media: HashMap<&[u8], PackURI> = HashMap::new();

        for (slide_index, slide) in self.slides.iter().enumerate() {
            let slide_uri = pack_uri(&format!("/ppt/slides/slide{}.xml", slide_index + 1))?;
            let mut slide_part = xml_part(&slide_uri, ct::PML_SLIDE, "");
            slide_part.relate_to(&layout_uri, rt::SLIDE_LAYOUT);

            for (image_index, (data, format)) in slide.collect_images().into_iter().enumerate() {
                let bytes: &[u8] = data;
                let image_uri = match media.get(bytes) {
                    Some(uri) => uri.clone(),
                    None => {
                        let uri = pack_uri(&format!(
                            "/ppt/media/image{}.{}",
                            media.len() + 1,
                            format.extension()
                        ))?;
                        package.add_part(Box::new(BlobPart::new(
                            uri.clone(),
                            format.mime_type().to_string(),
                            bytes.to_vec(),
                        )));
                        media.insert(bytes, uri.clone());
                        uri
                    },
                };
                let r_id = slide_part.relate_to(&image_uri, rt::IMAGE);
                rel_mapper.add_image(slide_index, image_index, r_id);
            }

            slide_part.set_xml(slide.to_xml_with_rels(slide_index, &rel_mapper)?);
            let r_id = pres_part.relate_to(&slide_uri, rt::SLIDE);
            rel_mapper.add_slide(slide_index, r_id);
            package.add_part(Box::new(slide_part));
        }

        pres_part.set_xml(self.generate_presentation_xml(&master_rid, &rel_mapper)?);

        package.add_part(Box::new(pres_part));
        package.add_part(Box::new(master));
        package.add_part(Box::new(layout));
        package.add_part(Box::new(xml_part(
            &theme_uri,
            ct::OFC_THEME,
            template::default_theme_xml(),
        )));
        package.add_part(Box::new(xml_part(
            &pres_props_uri,
            ct::PML_PRES_PROPS,
            template::default_pres_props_xml(),
        )));
        package.add_part(Box::new(xml_part(
            &view_props_uri,
            ct::PML_VIEW_PROPS,
            template::default_view_props_xml(),
        )));
        package.add_part(Box::new(xml_part(
            &table_styles_uri,
            ct::PML_TABLE_STYLES,
            template::default_table_styles_xml(),
        )));
        package.add_part(Box::new(xml_part(
            &core_uri,
            ct::OPC_CORE_PROPERTIES,
            template::default_core_props_xml(),
        )));
        package.add_part(Box::new(xml_part(
            &app_uri,
            ct::OFC_EXTENDED_PROPERTIES,
            &template::app_props_xml(self.slides.len()),
        )));

        package.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);
        package.relate_to(&core_uri, rt::CORE_PROPERTIES);
        package.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);

        Ok(package)
    }

    /// Generate presentation.xml content with actual relationship IDs.
    fn generate_presentation_xml(
        &self,
        master_rid: &str,
        rel_mapper: &RelationshipMapper,
    ) -> Result<String> {
        let mut xml = String::with_capacity(1024 + self.slides.len() * 48);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(
            xml,
            r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        write!(
            xml,
            r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="{}"/></p:sldMasterIdLst>"#,
            master_rid
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (index, slide) in self.slides.iter().enumerate() {
                let rel_id = rel_mapper.get_slide_id(index).ok_or_else(|| {
                    OoxmlError::InvalidFormat(format!("slide {} has no relationship", index + 1))
                })?;
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

impl Default for MutablePresentation {
    fn default() -> Self {
        Self::new()
    }
}

fn pack_uri(uri: &str) -> Result<PackURI> {
    PackURI::new(uri).map_err(OoxmlError::InvalidFormat)
}

fn xml_part(partname: &PackURI, content_type: &str, xml: &str) -> XmlPart {
    XmlPart::new(
        partname.clone(),
        content_type.to_string(),
        xml.as_bytes().to_vec(),
    )
}
