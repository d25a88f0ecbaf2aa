//! End-to-end runs against a generated song library.

use songdeck::ooxml::pptx::{MutablePresentation, Package};
use songdeck::songs::{
    assemble, parse_song_list, CombineError, HexColor, RunRequest, SongOutcome, StyleConfig,
    LINES_PER_SLIDE,
};
use std::io::{Cursor, Read};
use tempfile::TempDir;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDRfake-png-body";

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Write `name` into the library; each slide has one text box per shape.
fn write_song(dir: &TempDir, name: &str, slides: &[&[&[&str]]]) {
    let mut pres = MutablePresentation::widescreen();
    for shapes in slides {
        let slide = pres.add_slide();
        for paragraphs in *shapes {
            slide.add_paragraphs_box(paragraphs.iter().copied(), 0, 0, 914_400, 914_400);
        }
    }
    pres.save(dir.path().join(name)).unwrap();
}

fn request(dir: &TempDir, songs: &str, style: StyleConfig) -> RunRequest {
    RunRequest::new(parse_song_list(songs), style, dir.path())
}

/// Paragraph texts of every slide in the output, per shape.
fn read_back(bytes: &[u8]) -> Vec<Vec<Vec<String>>> {
    let package = Package::from_bytes(bytes).unwrap();
    let presentation = package.presentation().unwrap();
    presentation
        .slides()
        .unwrap()
        .iter()
        .map(|slide| slide.paragraphs().unwrap())
        .collect()
}

fn slide_xml(bytes: &[u8], number: usize) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut xml = String::new();
    archive
        .by_name(&format!("ppt/slides/slide{number}.xml"))
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

fn sample_library() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_song(
        &dir,
        "2 Amazing Grace.pptx",
        &[&[&["Amazing grace", "How sweet the sound"], &["Public domain"]]],
    );
    write_song(&dir, "20 Not Two.pptx", &[&[&["Wrong song", "Footer"]]]);
    let long: Vec<String> = (1..=12).map(|i| format!("Line {i}")).collect();
    let long: Vec<&str> = long.iter().map(String::as_str).collect();
    write_song(&dir, "3 Long Song.pptx", &[&[&long[..]], &[&["Coda"]]]);
    write_song(&dir, "5 Hymn.pptx", &[&[&["Verse", "(c) 1900"]]]);
    dir
}

#[test]
fn separators_follow_each_song() {
    let dir = sample_library();
    let (bytes, report) = assemble(&request(&dir, "2, 3, x, 5,,", StyleConfig::default())).unwrap();

    let slides = read_back(&bytes);
    // 2: one page; 3: two pages then one; 5: one page; each plus a separator
    assert_eq!(slides.len(), 1 + 1 + 3 + 1 + 1 + 1);
    assert_eq!(report.total_slides, slides.len());

    let separators: Vec<usize> = slides
        .iter()
        .enumerate()
        .filter(|(_, shapes)| shapes.is_empty())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(separators, [1, 5, 7]);

    assert_eq!(
        slides[0],
        [
            vec!["Amazing grace".to_string(), "How sweet the sound".to_string()],
            vec!["Public domain".to_string()],
        ]
    );
}

#[test]
fn long_slide_is_split_with_repeated_footer() {
    let dir = sample_library();
    let (bytes, report) = assemble(&request(&dir, "3", StyleConfig::default())).unwrap();
    let slides = read_back(&bytes);

    assert_eq!(slides[0][0].len(), LINES_PER_SLIDE);
    assert_eq!(slides[0][0][0], "Line 1");
    assert_eq!(slides[1][0], ["Line 9", "Line 10", "Line 11"]);
    assert_eq!(slides[0][1], ["Line 12"]);
    assert_eq!(slides[1][1], ["Line 12"]);

    // A lone line is body text with an empty footer
    assert_eq!(slides[2][0], ["Coda"]);
    assert_eq!(slides[2][1], [""]);

    assert_eq!(
        report.songs[0].outcome,
        SongOutcome::Combined {
            file: "3 Long Song.pptx".into(),
            source_slides: 2,
            content_slides: 3,
        }
    );
}

#[test]
fn identifier_prefix_is_bounded_by_space() {
    let dir = sample_library();
    let (bytes, _) = assemble(&request(&dir, "2", StyleConfig::default())).unwrap();
    let text: Vec<String> = read_back(&bytes).into_iter().flatten().flatten().collect();
    assert!(text.contains(&"Amazing grace".to_string()));
    assert!(!text.contains(&"Wrong song".to_string()));
}

#[test]
fn unmatched_songs_are_skipped() {
    let dir = sample_library();
    let (bytes, report) = assemble(&request(&dir, "99, 5, 98", StyleConfig::default())).unwrap();

    assert_eq!(read_back(&bytes).len(), 2);
    assert_eq!(report.songs.len(), 3);
    assert_eq!(report.songs[0].outcome, SongOutcome::NotFound);
    assert_eq!(report.songs[2].outcome, SongOutcome::NotFound);
    assert_eq!(report.combined(), 1);
}

#[test]
fn nothing_requested_gives_empty_deck() {
    let dir = sample_library();
    let (bytes, report) = assemble(&request(&dir, "x, y", StyleConfig::default())).unwrap();
    assert!(read_back(&bytes).is_empty());
    assert_eq!(report.total_slides, 0);
}

#[test]
fn missing_library_is_fatal() {
    let dir = TempDir::new().unwrap();
    let request = RunRequest::new(
        parse_song_list("1"),
        StyleConfig::default(),
        dir.path().join("songs"),
    );
    let err = assemble(&request).unwrap_err();
    assert!(matches!(err, CombineError::LibraryMissing { ref path } if path.ends_with("songs")));
}

#[test]
fn output_is_a_complete_package() {
    let dir = sample_library();
    let style = StyleConfig::new(
        "#ffff00".parse::<HexColor>().unwrap(),
        "#000033".parse::<HexColor>().unwrap(),
    )
    .with_background_image(PNG.to_vec())
    .unwrap()
    .with_logo(png(120, 60))
    .unwrap();
    let (bytes, report) = assemble(&request(&dir, "2, 5", style)).unwrap();

    let archive = zip::ZipArchive::new(Cursor::new(&bytes[..])).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    for required in [
        "[Content_Types].xml",
        "_rels/.rels",
        "ppt/presentation.xml",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/theme/theme1.xml",
    ] {
        assert!(names.iter().any(|n| n == required), "missing {required}");
    }
    let slide_parts = names
        .iter()
        .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
        .count();
    assert_eq!(slide_parts, report.total_slides);

    // Background and logo are stored once each however many slides use them
    let media = names.iter().filter(|n| n.starts_with("ppt/media/")).count();
    assert_eq!(media, 2);

    let slide_xml = slide_xml(&bytes, 1);
    assert!(slide_xml.contains(r#"<a:srgbClr val="000033"/>"#));
    assert!(slide_xml.contains(r#"<a:srgbClr val="FFFF00"/>"#));
    // 1 in wide, half as tall as the 2:1 logo
    assert!(slide_xml.contains(r#"<a:ext cx="914400" cy="457200"/>"#));

    let package = Package::from_bytes(&bytes).unwrap();
    let presentation = package.presentation().unwrap();
    assert_eq!(presentation.slide_width().unwrap(), Some(12_188_952));
    assert_eq!(presentation.slide_height().unwrap(), Some(6_858_000));
}

#[test]
fn separators_carry_only_the_background_picture() {
    let dir = sample_library();
    let style = StyleConfig::default()
        .with_background_image(PNG.to_vec())
        .unwrap()
        .with_logo(png(10, 10))
        .unwrap();
    let (bytes, report) = assemble(&request(&dir, "2, 5", style)).unwrap();
    assert_eq!(report.total_slides, 4);

    let slides = read_back(&bytes);
    for (index, shapes) in slides.iter().enumerate() {
        let xml = slide_xml(&bytes, index + 1);
        let pictures = xml.matches("<p:pic>").count();
        let separator = index % 2 == 1;

        if separator {
            assert!(shapes.is_empty(), "slide {} has text", index + 1);
            assert_eq!(pictures, 1, "slide {}", index + 1);
            assert!(!xml.contains("<p:sp>"));
            assert!(xml.contains(r#"descr="Background""#));
            assert!(!xml.contains(r#"descr="Logo""#));
            assert!(xml.contains(r#"<a:ext cx="12188952" cy="6858000"/>"#));
        } else {
            assert_eq!(shapes.len(), 2, "slide {}", index + 1);
            assert_eq!(pictures, 2, "slide {}", index + 1);
            assert!(xml.contains(r#"descr="Logo""#));
        }
    }
}
