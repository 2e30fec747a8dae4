//! PDF text extraction via `lopdf`.
//!
//! Pages are processed in document order.  A page whose text cannot be
//! extracted (scanned image, exotic encoding, damaged content stream)
//! contributes an empty line instead of failing the whole document, so one
//! bad page never loses the rest.

use lopdf::Document;

use super::ExtractError;

/// Extract plain text from PDF bytes, one entry per page, joined with
/// newlines.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    let pages = doc.get_pages();
    let mut out: Vec<String> = Vec::with_capacity(pages.len());

    for (&page_no, _) in pages.iter() {
        match doc.extract_text(&[page_no]) {
            Ok(text) => out.push(text.trim_end().to_string()),
            Err(e) => {
                log::warn!("pdf: page {page_no} yielded no text ({e}); emitting empty line");
                out.push(String::new());
            }
        }
    }

    Ok(out.join("\n"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
