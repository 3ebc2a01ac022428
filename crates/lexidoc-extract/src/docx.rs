//! DOCX text extraction.
//!
//! A DOCX file is a zip archive whose main body lives in
//! `word/document.xml`. Text nodes are concatenated and every closed
//! paragraph contributes a newline, which keeps paragraph boundaries intact
//! for downstream tokenization.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::ExtractError;

/// Extract text from a DOCX payload.
///
/// # Errors
///
/// Returns [`ExtractError::Zip`] when the payload is not a zip archive,
/// [`ExtractError::MissingDocumentXml`] when the archive lacks the main body
/// part, and [`ExtractError::Xml`] when the body is not well-formed XML.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| match e {
            ZipError::FileNotFound => ExtractError::MissingDocumentXml,
            other => ExtractError::Zip(other),
        })?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape().unwrap_or_default()),
            Event::End(e) if e.name().as_ref() == b"w:p" => text.push('\n'),
            Event::Empty(e) if e.name().as_ref() == b"w:tab" => text.push('\t'),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    fn docx_with_body(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn extracts_paragraph_text() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body><w:p><w:r><w:t>gain and loss</w:t></w:r></w:p></w:body></w:document>"#;
        let text = extract(&docx_with_body(xml)).expect("extract");
        assert!(text.contains("gain and loss"), "got: {text:?}");
    }

    #[test]
    fn paragraphs_separate_with_newlines() {
        let xml = concat!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
            "<w:p><w:r><w:t>first paragraph</w:t></w:r></w:p>",
            "<w:p><w:r><w:t>second paragraph</w:t></w:r></w:p>",
            "</w:body></w:document>",
        );
        let text = extract(&docx_with_body(xml)).expect("extract");
        assert!(
            text.contains("first paragraph\n"),
            "missing paragraph break: {text:?}"
        );
        assert!(text.contains("second paragraph"), "got: {text:?}");
    }

    #[test]
    fn xml_entities_are_unescaped() {
        let xml = concat!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
            "<w:p><w:r><w:t>profit &amp; loss</w:t></w:r></w:p>",
            "</w:body></w:document>",
        );
        let text = extract(&docx_with_body(xml)).expect("extract");
        assert!(text.contains("profit & loss"), "got: {text:?}");
    }

    #[test]
    fn archive_without_body_part_fails() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/other.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<doc/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract(&bytes).unwrap_err();
        assert!(matches!(err, ExtractError::MissingDocumentXml));
    }

    #[test]
    fn garbage_bytes_fail_to_open() {
        let err = extract(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ExtractError::Zip(_)));
    }
}
