//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default content root, relative to the working directory
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";

/// Language used by `/file/translate` when the form omits `target_language`
pub const DEFAULT_TARGET_LANGUAGE: &str = "English";

/// Maximum number of characters accepted in an uploaded file
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Content root for original and derived files
    pub uploads_dir: PathBuf,

    /// Model backend
    pub llm_provider: String,
    pub ollama_base_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,

    /// File pipeline
    pub default_target_language: String,
    pub max_content_chars: usize,

    /// Runtime configuration
    pub rust_log: String,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            llm_provider: "ollama".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            llm_model: "llama3.1:latest".to_string(),
            llm_timeout_secs: 120,
            default_target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            rust_log: "filechat=debug,tower_http=info".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let defaults = Self::default();

        let config = Self {
            uploads_dir: env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.uploads_dir),

            llm_provider: env::var("LLM_PROVIDER").unwrap_or(defaults.llm_provider),
            ollama_base_url: env::var("OLLAMA_BASE_URL").unwrap_or(defaults.ollama_base_url),
            llm_model: env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_timeout_secs: parse_var("LLM_TIMEOUT_SECS", defaults.llm_timeout_secs)?,

            default_target_language: env::var("DEFAULT_TARGET_LANGUAGE")
                .unwrap_or(defaults.default_target_language),
            max_content_chars: parse_var("MAX_CONTENT_CHARS", defaults.max_content_chars)?,

            rust_log: env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
        };

        if config.max_content_chars == 0 {
            anyhow::bail!("MAX_CONTENT_CHARS must be greater than zero");
        }

        Ok(config)
    }
}

/// Parse an optional numeric variable, failing loudly on garbage
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} is invalid ({}): {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}
