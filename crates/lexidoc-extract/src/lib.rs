//! Plain-text extraction from uploaded document files.
//!
//! Supports PDF and DOCX payloads, dispatched on the filename extension.
//! Extraction is pure: bytes in, text out, no filesystem or network access.

pub mod docx;
pub mod pdf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file extension: {0:?}")]
    UnsupportedExtension(String),

    #[error("PDF parse error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("DOCX archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("DOCX XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("DOCX archive has no word/document.xml")]
    MissingDocumentXml,

    #[error("I/O error reading archive entry: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detect the format from a filename's extension, case-insensitively.
    #[must_use]
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit_once('.').map(|(_, e)| e.to_lowercase())?;
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// Extract plain text from an uploaded file.
///
/// # Errors
///
/// Returns [`ExtractError::UnsupportedExtension`] when the filename does not
/// end in `.pdf` or `.docx`, or the format-specific error when the payload
/// cannot be parsed.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let format = DocumentFormat::from_filename(filename).ok_or_else(|| {
        let ext = filename
            .rsplit_once('.')
            .map_or_else(String::new, |(_, e)| e.to_string());
        ExtractError::UnsupportedExtension(ext)
    })?;

    match format {
        DocumentFormat::Pdf => pdf::extract(bytes),
        DocumentFormat::Docx => docx::extract(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_pdf_and_docx_extensions() {
        assert_eq!(
            DocumentFormat::from_filename("report.pdf"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_filename("Report.DOCX"),
            Some(DocumentFormat::Docx)
        );
    }

    #[test]
    fn rejects_other_extensions() {
        assert_eq!(DocumentFormat::from_filename("notes.txt"), None);
        assert_eq!(DocumentFormat::from_filename("archive.doc"), None);
        assert_eq!(DocumentFormat::from_filename("no_extension"), None);
    }

    #[test]
    fn extract_text_reports_unsupported_extension() {
        let err = extract_text("notes.txt", b"hello").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedExtension(ref e) if e == "txt"));
    }
}
