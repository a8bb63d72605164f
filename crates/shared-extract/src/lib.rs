//! Shared document text extraction
//!
//! Turns uploaded document bytes into plain text for analysis. PDF and DOCX
//! are supported; the legacy binary `.doc` format is recognized and rejected
//! up front.

pub mod docx;
pub mod pdf;

use thiserror::Error;

/// Declared media types the upload endpoint accepts or knows how to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Docx,
    /// `application/msword`: recognized so it can fail with a useful message
    /// instead of a generic "unsupported type".
    LegacyDoc,
}

impl MediaType {
    /// Classifies a declared content type, ignoring parameters and case.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase();

        match essence.as_str() {
            "application/pdf" => Some(MediaType::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(MediaType::Docx)
            }
            "application/msword" => Some(MediaType::LegacyDoc),
            _ => None,
        }
    }
}

/// Extraction failure classes. All of these indicate bad input rather than a
/// server defect.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("el formato .doc antiguo no está soportado; convierta el archivo a .docx")]
    LegacyDoc,

    #[error("no se pudo extraer texto del PDF: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    #[error("el archivo DOCX no es un contenedor válido: {0}")]
    DocxContainer(#[from] zip::result::ZipError),

    #[error("el archivo DOCX no contiene word/document.xml")]
    DocxMissingDocument,

    #[error("no se pudo leer el contenido del DOCX: {0}")]
    DocxRead(#[from] std::io::Error),

    #[error("el XML del DOCX no es válido: {0}")]
    DocxXml(#[from] quick_xml::Error),
}

/// Extracts plain text from document bytes according to the declared media
/// type.
pub fn extract_text(bytes: &[u8], media_type: MediaType) -> Result<String, ExtractError> {
    match media_type {
        MediaType::Pdf => pdf::extract_pdf_text(bytes),
        MediaType::Docx => docx::extract_docx_text(bytes),
        MediaType::LegacyDoc => Err(ExtractError::LegacyDoc),
    }
}
