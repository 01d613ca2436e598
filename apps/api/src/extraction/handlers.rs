use anyhow::Context;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::pipeline::{self, PipelineOptions};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub file_size_bytes: usize,
    /// `null` when no attempt produced parseable JSON; the caller reads
    /// presence of this field as pipeline success.
    pub resume: Option<Value>,
}

/// POST /resume-to-json/
///
/// Accepts a multipart upload with the PDF in the `file` field; other fields
/// are skipped. Validation order: extension, API key, non-empty body. The
/// extraction prompt is read fresh on every request so edits take effect
/// immediately.
pub async fn handle_resume_to_json(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file data: {e}")))?;
            upload = Some((filename, bytes));
            break;
        }
    }
    let (filename, pdf_bytes) = upload.ok_or_else(|| {
        AppError::Validation("No file provided. Use field name 'file'".to_string())
    })?;

    if !filename.ends_with(".pdf") {
        return Err(AppError::Validation("File must be a PDF".to_string()));
    }
    let llm = state.llm.as_ref().ok_or(AppError::MissingApiKey)?;
    if pdf_bytes.is_empty() {
        return Err(AppError::Validation("Empty PDF file".to_string()));
    }

    let prompt = tokio::fs::read_to_string(&state.config.prompt_path)
        .await
        .with_context(|| format!("Failed to read prompt file {}", state.config.prompt_path))?;

    info!("Processing upload {filename} ({} bytes)", pdf_bytes.len());

    let options = PipelineOptions {
        target_size_kb: state.config.llm_target_size_kb,
        max_attempts: state.config.max_extraction_attempts,
    };
    let file_size_bytes = pdf_bytes.len();
    let resume = pipeline::resume_to_json(llm.as_ref(), pdf_bytes, &prompt, options).await?;

    Ok(Json(UploadResponse {
        filename,
        file_size_bytes,
        resume,
    }))
}
