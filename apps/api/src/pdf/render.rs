//! Text to minimal-PDF re-encoding.
//!
//! Deterministic single-pass layout: newline-delimited input lines, greedy
//! 80-character word wrap, fixed margins and line height, page breaks by
//! vertical cursor. Character count is the wrap heuristic, not rendered
//! width; there is no reflow lookahead.

use std::io::Cursor;

use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};
use thiserror::Error;

/// US letter, in PostScript points.
pub const LETTER: PageSize = PageSize {
    width_pt: 612.0,
    height_pt: 792.0,
};

const MARGIN_PT: f32 = 40.0;
const LINE_HEIGHT_PT: f32 = 12.0;
const FONT_SIZE_PT: f32 = 12.0;
const WRAP_COLUMNS: usize = 80;

#[derive(Debug, Clone, Copy)]
pub struct PageSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

#[derive(Debug, Error)]
#[error("PDF encoding failed: {0}")]
pub struct RenderError(String);

/// Lays `text` out into a new single-font PDF.
///
/// Lines wrap at 80 characters (whole words, no hyphenation); each drawn
/// line advances the cursor by the fixed line height, and a line that would
/// land below the bottom margin starts a new page instead.
pub fn render(text: &str, page: PageSize) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "document",
        Mm::from(Pt(page.width_pt)),
        Mm::from(Pt(page.height_pt)),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = page.height_pt - MARGIN_PT;

    for line in text.split('\n') {
        for drawn in wrap_line(line) {
            if y < MARGIN_PT {
                let (next_page, next_layer) = doc.add_page(
                    Mm::from(Pt(page.width_pt)),
                    Mm::from(Pt(page.height_pt)),
                    "Layer 1",
                );
                layer = doc.get_page(next_page).get_layer(next_layer);
                y = page.height_pt - MARGIN_PT;
            }
            layer.use_text(
                drawn,
                FONT_SIZE_PT,
                Mm::from(Pt(MARGIN_PT)),
                Mm::from(Pt(y)),
                &font,
            );
            y -= LINE_HEIGHT_PT;
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| RenderError(e.to_string()))?;
    Ok(compress_streams(bytes))
}

/// Splits an over-long line into word-accumulated pieces under the wrap
/// threshold. Lines at or under the threshold pass through untouched, as
/// does a single word that exceeds it on its own.
fn wrap_line(line: &str) -> Vec<String> {
    if line.chars().count() <= WRAP_COLUMNS {
        return vec![line.to_string()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in line.split(' ') {
        if current.chars().count() + word.chars().count() < WRAP_COLUMNS {
            current.push_str(word);
            current.push(' ');
        } else {
            if !current.is_empty() {
                wrapped.push(current.trim().to_string());
            }
            current = format!("{word} ");
        }
    }
    if !current.is_empty() {
        wrapped.push(current.trim().to_string());
    }
    wrapped
}

/// Recompresses the document's content streams. printpdf writes them
/// uncompressed; the lopdf round-trip shrinks them considerably. Falls back
/// to the uncompressed bytes when the round-trip fails.
fn compress_streams(pdf: Vec<u8>) -> Vec<u8> {
    let mut doc = match lopdf::Document::load_mem(&pdf) {
        Ok(doc) => doc,
        Err(_) => return pdf,
    };
    doc.compress();

    let mut output = Cursor::new(Vec::new());
    match doc.save_to(&mut output) {
        Ok(()) => output.into_inner(),
        Err(_) => pdf,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── wrap_line ──

    #[test]
    fn test_short_line_passes_through_unwrapped() {
        assert_eq!(
            wrap_line("Senior Rust Engineer"),
            vec!["Senior Rust Engineer"]
        );
    }

    #[test]
    fn test_line_at_threshold_passes_through() {
        let line = "a".repeat(80);
        assert_eq!(wrap_line(&line), vec![line.clone()]);
    }

    #[test]
    fn test_long_line_wraps_under_threshold() {
        let line = "skill ".repeat(30).trim_end().to_string();
        let wrapped = wrap_line(&line);
        assert!(wrapped.len() > 1);
        for piece in &wrapped {
            assert!(piece.chars().count() <= WRAP_COLUMNS);
        }
    }

    #[test]
    fn test_wrap_preserves_word_order() {
        let line = (0..40)
            .map(|i| format!("word{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let wrapped = wrap_line(&line);
        let rejoined = wrapped.join(" ");
        assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>(),
            line.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_overlong_word_is_kept_whole() {
        let word = "x".repeat(100);
        assert_eq!(wrap_line(&word), vec![word.clone()]);
    }

    // ── render ──

    #[test]
    fn test_render_produces_a_pdf() {
        let pdf = render("hello", LETTER).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_empty_text_is_near_empty_but_valid() {
        let pdf = render("", LETTER).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        let doc = lopdf::Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_paginates_when_text_overflows_page() {
        let text = (0..100)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let pdf = render(&text, LETTER).unwrap();
        let doc = lopdf::Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_render_short_text_stays_on_one_page() {
        let text = (0..10)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let pdf = render(&text, LETTER).unwrap();
        let doc = lopdf::Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
