//! PPTX text extraction.
//!
//! A `.pptx` file is a zip archive with one XML part per slide under
//! `ppt/slides/slideN.xml`.  Shape text is carried by `a:t` runs grouped
//! into `a:p` paragraphs.  Extraction walks the slides in numeric order and
//! emits one line per paragraph, so the result reads top to bottom through
//! the deck.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractError;

const SLIDE_PREFIX: &str = "ppt/slides/slide";
const SLIDE_SUFFIX: &str = ".xml";

/// Extract plain text from PPTX bytes, slides in order, one paragraph per
/// line.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Archive(e.to_string()))?;

    // Slide part names are not stored in any guaranteed order inside the
    // archive, so sort by the numeric slide index.
    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| slide_index(name).map(|idx| (idx, name.to_string())))
        .collect();
    slides.sort_by_key(|(idx, _)| *idx);

    let mut lines: Vec<String> = Vec::new();
    for (_, name) in &slides {
        let mut xml = String::new();
        archive
            .by_name(name)
            .map_err(|e| ExtractError::Archive(e.to_string()))?
            .read_to_string(&mut xml)
            .map_err(|e| ExtractError::Archive(e.to_string()))?;
        collect_slide_lines(&xml, &mut lines)?;
    }

    Ok(lines.join("\n"))
}

/// Parse the slide number out of `ppt/slides/slideN.xml`; anything else
/// (layouts, masters, rels) returns `None`.
fn slide_index(name: &str) -> Option<u32> {
    name.strip_prefix(SLIDE_PREFIX)?
        .strip_suffix(SLIDE_SUFFIX)?
        .parse()
        .ok()
}

/// Append one line per `a:p` paragraph found in a single slide's XML.
///
/// Paragraphs with no `a:t` runs are skipped; unlike a word-processing
/// document, empty placeholder paragraphs on a slide carry no structure
/// worth preserving.
fn collect_slide_lines(xml: &str, lines: &mut Vec<String>) -> Result<(), ExtractError> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();

    let mut current = String::new();
    let mut saw_text = false;
    let mut in_run_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"a:t" => in_run_text = true,
            Ok(Event::Text(t)) if in_run_text => {
                let text = t.unescape().map_err(|e| ExtractError::Xml(e.to_string()))?;
                current.push_str(&text);
                saw_text = true;
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"a:t" => in_run_text = false,
                b"a:p" => {
                    if saw_text {
                        lines.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    saw_text = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn slide_xml(texts: &[&str]) -> String {
        let paragraphs: String = texts
            .iter()
            .map(|t| format!("<a:p><a:r><a:t>{t}</a:t></a:r></a:p>"))
            .collect();
        format!(
            "<?xml version=\"1.0\"?>\
             <p:sld xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\" \
                    xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\">\
             <p:cSld><p:spTree><p:sp><p:txBody>{paragraphs}</p:txBody></p:sp>\
             </p:spTree></p:cSld></p:sld>"
        )
    }

    /// Build an in-memory PPTX whose Nth slide holds the Nth text.
    fn make_pptx(slide_texts: &[&[&str]]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut cursor);
        for (i, texts) in slide_texts.iter().enumerate() {
            let name = format!("{}{}{}", SLIDE_PREFIX, i + 1, SLIDE_SUFFIX);
            writer
                .start_file(name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(slide_xml(texts).as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn one_shape_per_slide() {
        let bytes = make_pptx(&[&["Slide1"], &["Slide2"]]);
        assert_eq!(extract(&bytes).unwrap(), "Slide1\nSlide2");
    }

    #[test]
    fn slides_sort_numerically_not_lexically() {
        // slide10 must come after slide2 even though "slide10" < "slide2"
        // as strings.
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut cursor);
        for n in [10u32, 2, 1] {
            writer
                .start_file(
                    format!("{SLIDE_PREFIX}{n}{SLIDE_SUFFIX}"),
                    SimpleFileOptions::default(),
                )
                .unwrap();
            let label = format!("deck{n}");
            writer
                .write_all(slide_xml(&[label.as_str()]).as_bytes())
                .unwrap();
        }
        writer.finish().unwrap();

        let text = extract(&cursor.into_inner()).unwrap();
        assert_eq!(text, "deck1\ndeck2\ndeck10");
    }

    #[test]
    fn multiple_paragraphs_on_one_slide() {
        let bytes = make_pptx(&[&["title", "bullet one", "bullet two"]]);
        assert_eq!(extract(&bytes).unwrap(), "title\nbullet one\nbullet two");
    }

    #[test]
    fn non_slide_parts_are_ignored() {
        assert_eq!(slide_index("ppt/slides/slide3.xml"), Some(3));
        assert_eq!(slide_index("ppt/slides/_rels/slide3.xml.rels"), None);
        assert_eq!(slide_index("ppt/slideLayouts/slideLayout1.xml"), None);
        assert_eq!(slide_index("ppt/slides/slideX.xml"), None);
    }

    #[test]
    fn deck_with_no_slides_yields_empty_text() {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut cursor);
        writer
            .start_file("ppt/presentation.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<p:presentation/>").unwrap();
        writer.finish().unwrap();

        assert_eq!(extract(&cursor.into_inner()).unwrap(), "");
    }

    #[test]
    fn not_a_zip_is_an_archive_error() {
        let err = extract(b"not a deck").unwrap_err();
        assert!(matches!(err, ExtractError::Archive(_)));
    }

    #[test]
    fn extraction_is_idempotent() {
        let bytes = make_pptx(&[&["Slide1"], &["Slide2"]]);
        assert_eq!(extract(&bytes).unwrap(), extract(&bytes).unwrap());
    }
}
