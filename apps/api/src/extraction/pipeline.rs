//! The upload pipeline: compress, submit to the model, parse, retry.
//!
//! Each attempt is a fresh, independent model call on the same original
//! bytes; nothing from a failed reply is reused. The attempt ceiling is an
//! explicit loop bound, so exhaustion is an ordinary `Ok(None)` branch and
//! never an error.
//!
//! # spawn_blocking pattern
//! PDF parsing and re-encoding are CPU-bound; `spawn_blocking` keeps the
//! tokio scheduler unblocked. The closure takes owned bytes (required for
//! the 'static bound) and returns only the compressed document.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, info, warn, Level};

use crate::errors::AppError;
use crate::extraction::parser;
use crate::llm_client::DocumentModel;
use crate::pdf;

/// Per-request pipeline knobs, passed in explicitly from `Config`.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Compression budget (KB) for the document submitted to the model.
    pub target_size_kb: usize,
    /// Ceiling on model calls when replies keep yielding no JSON.
    pub max_attempts: u32,
}

/// Runs the extraction pipeline against `pdf_bytes`.
///
/// Returns the first JSON value any attempt's reply yields, `Ok(None)` when
/// every attempt through the ceiling came back without parseable JSON, and
/// `Err` only for provider or task failures. Provider errors are fatal for
/// the request; they are never retried here.
pub async fn resume_to_json(
    llm: &dyn DocumentModel,
    pdf_bytes: Bytes,
    prompt: &str,
    options: PipelineOptions,
) -> Result<Option<Value>, AppError> {
    for attempt in 0..options.max_attempts {
        info!(
            "Extraction attempt {}/{}",
            attempt + 1,
            options.max_attempts
        );

        let bytes = pdf_bytes.clone();
        let target = options.target_size_kb;
        let compressed = tokio::task::spawn_blocking(move || pdf::compress(&bytes, target))
            .await
            .map_err(|e| anyhow::anyhow!("compression task failed: {e}"))?;

        if tracing::enabled!(Level::DEBUG) {
            log_compressed_preview(&compressed);
        }

        let document_b64 = BASE64.encode(&compressed);
        let reply = llm
            .read_document(prompt, &document_b64)
            .await
            .map_err(|e| AppError::Llm(e.to_string()))?;

        match parser::extract_json(&reply) {
            Some(value) => return Ok(Some(value)),
            None => debug!("Reply yielded no JSON on attempt {}", attempt + 1),
        }
    }

    info!(
        "All {} extraction attempts exhausted, resume is absent",
        options.max_attempts
    );
    Ok(None)
}

/// Best-effort diagnostic: what does the model actually see?
fn log_compressed_preview(compressed: &[u8]) {
    match pdf::extract::extract(compressed) {
        Ok(text) => {
            let preview: String = text.chars().take(500).collect();
            debug!("Compressed PDF text content (first 500 chars): {preview}...");
            debug!(
                "Total compressed text length: {} characters",
                text.chars().count()
            );
        }
        Err(e) => warn!("Could not extract text from compressed PDF for logging: {e}"),
    }
}
