//! PDF text extraction over in-memory bytes.

use pdf_extract::extract_text_from_mem_by_pages;

use crate::ExtractError;

/// Extracts text page by page. Pages that yield no text contribute nothing;
/// each page with text is followed by a newline.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = extract_text_from_mem_by_pages(bytes)?;

    let mut text = String::new();
    for page in &pages {
        if !page.trim().is_empty() {
            text.push_str(page);
            text.push('\n');
        }
    }

    Ok(text)
}
