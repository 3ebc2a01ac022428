//! PDF text extraction.

use lopdf::Document;

use crate::ExtractError;

/// Extract text from every page of a PDF, concatenated in page order.
///
/// # Errors
///
/// Returns [`ExtractError::Pdf`] when the payload is not a loadable PDF or a
/// page's content stream cannot be decoded.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes)?;
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();

    let mut text = String::new();
    for page in pages {
        text.push_str(&doc.extract_text(&[page])?);
    }
    Ok(text)
}
