//! LLM client: the single point of entry for all Claude API calls in the service.
//!
//! ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
//! All LLM interactions MUST go through this module.
//!
//! Model: claude-3-5-haiku-20241022 (hardcoded, not configurable, to prevent drift)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in the service.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-3-5-haiku-20241022";
const MAX_TOKENS: u32 = 4000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Reads a prompt plus a base64-encoded PDF document and returns the model's
/// raw reply text. Implemented by `LlmClient`; tests substitute scripted
/// doubles so no network is involved.
#[async_trait]
pub trait DocumentModel: Send + Sync {
    async fn read_document(&self, prompt: &str, document_b64: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

/// One block of a user message. Serializes to the Messages API wire shape:
/// `{"type": "text", ...}` or `{"type": "document", "source": {...}}`.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    Document { source: DocumentSource<'a> },
}

#[derive(Debug, Serialize)]
struct DocumentSource<'a> {
    #[serde(rename = "type")]
    source_type: &'a str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// The live Anthropic Messages client. One synchronous request per call;
/// provider errors are not retried here, they fail the whole upload request.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn call(&self, request: &AnthropicRequest<'_>) -> Result<LlmResponse, LlmError> {
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Surface the provider's own message when the error body parses
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl DocumentModel for LlmClient {
    async fn read_document(&self, prompt: &str, document_b64: &str) -> Result<String, LlmError> {
        let request = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: prompt },
                    ContentPart::Document {
                        source: DocumentSource {
                            source_type: "base64",
                            media_type: "application/pdf",
                            data: document_b64,
                        },
                    },
                ],
            }],
        };

        let response = self.call(&request).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_request<'a>(prompt: &'a str, document_b64: &'a str) -> AnthropicRequest<'a> {
        AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: prompt },
                    ContentPart::Document {
                        source: DocumentSource {
                            source_type: "base64",
                            media_type: "application/pdf",
                            data: document_b64,
                        },
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_request_serializes_to_messages_wire_shape() {
        let request = make_request("Extract this resume", "QUJD");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "claude-3-5-haiku-20241022");
        assert_eq!(value["max_tokens"], 4000);
        assert_eq!(value["messages"][0]["role"], "user");

        let content = &value["messages"][0]["content"];
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[0]["text"], "Extract this resume");
        assert_eq!(content[1]["type"], "document");
        assert_eq!(
            content[1]["source"],
            json!({
                "type": "base64",
                "media_type": "application/pdf",
                "data": "QUJD"
            })
        );
    }

    #[test]
    fn test_response_text_takes_first_text_block() {
        let raw = r#"{
            "content": [
                {"type": "tool_use", "text": null},
                {"type": "text", "text": "first"},
                {"type": "text", "text": "second"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }"#;
        let response: LlmResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), Some("first"));
    }

    #[test]
    fn test_response_text_none_when_no_text_block() {
        let raw = r#"{"content": [], "usage": {"input_tokens": 1, "output_tokens": 0}}"#;
        let response: LlmResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_provider_error_body_parses() {
        let raw = r#"{"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}"#;
        let parsed: AnthropicError = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.error.message, "Overloaded");
    }
}
