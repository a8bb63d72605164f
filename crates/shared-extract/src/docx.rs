//! DOCX text extraction.
//!
//! A DOCX file is a zip container; the document body lives in
//! `word/document.xml`. Text is carried by `<w:t>` runs grouped into `<w:p>`
//! paragraphs. Each paragraph ends with a newline, empty paragraphs included,
//! so the extracted text keeps the document's blank-line structure.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::ExtractError;

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut xml = String::new();
    match archive.by_name("word/document.xml") {
        Ok(mut file) => {
            file.read_to_string(&mut xml)?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ExtractError::DocxMissingDocument);
        }
        Err(err) => return Err(err.into()),
    }

    paragraphs_from_xml(&xml)
}

/// Streams the document XML, concatenating `<w:t>` run text and emitting a
/// newline at every paragraph boundary.
fn paragraphs_from_xml(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => {
                in_text_run = true;
            }
            Event::End(e) if e.local_name().as_ref() == b"t" => {
                in_text_run = false;
            }
            Event::Text(t) if in_text_run => {
                let run = t.unescape().map_err(quick_xml::Error::from)?;
                text.push_str(&run);
            }
            // Paragraph boundary; self-closing <w:p/> is an empty paragraph
            // and still contributes its blank line.
            Event::End(e) if e.local_name().as_ref() == b"p" => {
                text.push('\n');
            }
            Event::Empty(e) if e.local_name().as_ref() == b"p" => {
                text.push('\n');
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
