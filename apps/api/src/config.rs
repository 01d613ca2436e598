use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default except the API key, which may be absent:
/// the service still starts, and uploads fail with a 500 until it is set.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    /// Extraction prompt file, read fresh on every upload request.
    pub prompt_path: String,
    /// Landing page file, read fresh on every request to `/`.
    pub index_path: String,
    /// Compression budget (KB) for PDFs submitted to the LLM.
    pub llm_target_size_kb: usize,
    /// Ceiling on model calls per upload when the reply yields no JSON.
    pub max_extraction_attempts: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            prompt_path: std::env::var("PROMPT_PATH").unwrap_or_else(|_| "./prompt.md".to_string()),
            index_path: std::env::var("INDEX_PATH")
                .unwrap_or_else(|_| "./public/index.html".to_string()),
            llm_target_size_kb: std::env::var("LLM_TARGET_SIZE_KB")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<usize>()
                .context("LLM_TARGET_SIZE_KB must be a positive integer")?,
            max_extraction_attempts: std::env::var("MAX_EXTRACTION_ATTEMPTS")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<u32>()
                .context("MAX_EXTRACTION_ATTEMPTS must be a positive integer")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
