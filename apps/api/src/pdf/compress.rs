//! Size-budget compression: extract the text, re-encode it minimally, and
//! truncate once if the result still overshoots the budget.
//!
//! Infallible by contract. Any failure along the way degrades to returning
//! bytes we already have (the caller's original PDF, or the first re-encoded
//! candidate) rather than surfacing an error.

use tracing::{info, warn};

use crate::pdf::{extract, render};

/// Appended to the text when the truncation pass fires.
pub const TRUNCATION_MARKER: &str = "\n... [content truncated]";

/// Safety margin applied to the truncation ratio: re-encoding carries fixed
/// overhead, so aiming for exactly the budget would overshoot again.
const TRUNCATION_SAFETY: f64 = 0.8;

/// Compresses a PDF toward `target_size_kb` by re-encoding its text content.
///
/// 1. Extract text; on failure return the original bytes unchanged.
/// 2. Re-encode to a first candidate; on failure return the original bytes.
/// 3. A candidate within budget is returned as-is.
/// 4. Otherwise truncate the extracted text proportionally, append the
///    truncation marker, and re-encode once more. That second candidate is
///    returned regardless of whether it made the budget; there is at most
///    one truncation pass.
pub fn compress(pdf_bytes: &[u8], target_size_kb: usize) -> Vec<u8> {
    info!("Original PDF size: {} bytes", pdf_bytes.len());

    let text = match extract::extract(pdf_bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("PDF text extraction failed, returning original bytes: {e}");
            return pdf_bytes.to_vec();
        }
    };
    info!("Extracted text length: {} characters", text.chars().count());

    let candidate = match render::render(&text, render::LETTER) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("PDF re-encoding failed, returning original bytes: {e}");
            return pdf_bytes.to_vec();
        }
    };
    info!("Compressed PDF size: {} bytes", candidate.len());

    let budget = target_size_kb * 1024;
    if candidate.len() <= budget {
        return candidate;
    }

    info!("PDF still too large, truncating text content");
    let total_chars = text.chars().count();
    let max_chars =
        (total_chars as f64 * budget as f64 / candidate.len() as f64 * TRUNCATION_SAFETY) as usize;

    // Truncate the original extracted text, not the candidate PDF. Taking
    // whole chars keeps the cut boundary-safe for multi-byte text.
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str(TRUNCATION_MARKER);

    match render::render(&truncated, render::LETTER) {
        Ok(bytes) => {
            info!("Final compressed PDF size: {} bytes", bytes.len());
            bytes
        }
        Err(e) => {
            warn!("Truncated re-encoding failed, returning first candidate: {e}");
            candidate
        }
    }
}
