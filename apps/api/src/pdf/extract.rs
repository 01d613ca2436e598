//! Best-effort plain-text extraction from uploaded PDF bytes.

use pdf_extract::OutputError;

/// Extracts plain text from raw PDF bytes: each page's text followed by a
/// newline, in page order.
///
/// pdf-extract separates pages with a form feed; each page contributes its
/// text plus one trailing `\n`, so a page with no extractable text still
/// contributes the newline. A document that cannot be parsed at all is an
/// error; the compressor treats that as its cue to fall back to the original
/// bytes.
pub fn extract(pdf_bytes: &[u8]) -> Result<String, OutputError> {
    let raw = pdf_extract::extract_text_from_mem(pdf_bytes)?;

    let mut text = String::with_capacity(raw.len() + 8);
    for page in raw.split('\u{000C}') {
        text.push_str(page);
        text.push('\n');
    }
    Ok(text)
}
