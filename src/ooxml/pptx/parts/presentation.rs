/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use quick_xml::Reader;
use quick_xml::events::Event;

/// The main presentation part.
///
/// Holds the ordered slide list (`p:sldIdLst`) and the slide size (`p:sldSz`).
pub struct PresentationPart<'a> {
    /// The underlying OPC part
    part: &'a dyn Part,
}

impl<'a> PresentationPart<'a> {
    #[inline]
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { part }
    }

    /// Get the underlying OPC part.
    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    /// Number of `<p:sldId>` entries.
    pub fn slide_count(&self) -> Result<usize> {
        Ok(self.slide_rids()?.len())
    }

    /// Relationship IDs of the slides, in presentation order.
    ///
    /// The order of `<p:sldId>` elements is the slide order; the `r:id`
    /// attribute links each entry to its slide part.
    pub fn slide_rids(&self) -> Result<Vec<String>> {
        let mut reader = Reader::from_reader(self.part.blob());
        reader.config_mut().trim_text(true);

        let mut rids = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"sldId" {
                        for attr in e.attributes() {
                            let attr = attr?;
                            // r:id; the unprefixed id is the numeric slide id
                            if attr.key.local_name().as_ref() == b"id"
                                && attr.key.prefix().is_some()
                            {
                                rids.push(attr.unescape_value()?.into_owned());
                            }
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(rids)
    }

    /// Slide size as `(cx, cy)` in EMUs, or None if `<p:sldSz>` is absent.
    pub fn slide_size(&self) -> Result<Option<(i64, i64)>> {
        let mut reader = Reader::from_reader(self.part.blob());
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sldSz" => {
                    let mut cx = None;
                    let mut cy = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"cx" => cx = Some(parse_emu(&attr.value)?),
                            b"cy" => cy = Some(parse_emu(&attr.value)?),
                            _ => {},
                        }
                    }
                    return Ok(cx.zip(cy));
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(None)
    }
}

fn parse_emu(value: &[u8]) -> Result<i64> {
    atoi_simd::parse::<i64>(value).map_err(|_| {
        OoxmlError::Xml(format!(
            "Invalid slide dimension: {}",
            String::from_utf8_lossy(value)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use crate::ooxml::opc::{PackURI, XmlPart};

    fn part(xml: &str) -> XmlPart {
        XmlPart::new(
            PackURI::new("/ppt/presentation.xml").unwrap(),
            ct::PML_PRESENTATION_MAIN.to_string(),
            xml.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_slide_rids_in_document_order() {
        let xml = r#"<p:presentation xmlns:p="p" xmlns:r="r">
            <p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
            <p:sldIdLst>
                <p:sldId id="257" r:id="rId7"/>
                <p:sldId id="256" r:id="rId2"/>
            </p:sldIdLst>
            <p:sldSz cx="12188952" cy="6858000"/>
        </p:presentation>"#;
        let part = part(xml);
        let pres = PresentationPart::from_part(&part);

        assert_eq!(pres.slide_rids().unwrap(), vec!["rId7", "rId2"]);
        assert_eq!(pres.slide_count().unwrap(), 2);
        assert_eq!(pres.slide_size().unwrap(), Some((12_188_952, 6_858_000)));
    }

    #[test]
    fn test_no_slides_no_size() {
        let part = part(r#"<p:presentation xmlns:p="p"/>"#);
        let pres = PresentationPart::from_part(&part);

        assert_eq!(pres.slide_count().unwrap(), 0);
        assert_eq!(pres.slide_size().unwrap(), None);
    }

    #[test]
    fn test_bad_slide_size() {
        let part = part(r#"<p:presentation xmlns:p="p"><p:sldSz cx="wide" cy="1"/></p:presentation>"#);
        let pres = PresentationPart::from_part(&part);
        assert!(pres.slide_size().is_err());
    }
}
