//! Filechat Model Gateway
//!
//! Adapter between the file pipeline and a text-generation backend:
//! - `LlmService` trait with an Ollama implementation for local models
//! - Programmable mock service for tests and offline development
//! - `ModelGateway`, which turns a task plus content into a single prompt
//!
//! Every call is a single attempt. Retry policy belongs to callers.

pub mod gateway;
pub mod mock;
pub mod ollama;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use filechat_common::Config;

pub use gateway::{Instruction, ModelGateway};

/// Default model identifier sent to the backend
pub const DEFAULT_MODEL: &str = "llama3.1:latest";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Backend unreachable, misconfigured, or answered with an error
    #[error("Model backend unavailable: {0}")]
    Unavailable(String),

    /// Backend answered but without a usable result field
    #[error("Incomplete response from model backend: {0}")]
    IncompleteResponse(String),

    #[error("LLM configuration error: {0}")]
    Configuration(String),
}

/// A single completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier; empty means the service default
    pub model: String,
    /// Fully assembled prompt
    pub prompt: String,
}

/// Completion returned by a backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

/// LLM service configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Backend provider (ollama, mock)
    pub provider: String,
    pub base_url: Option<String>,
    pub default_model: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            base_url: None,
            default_model: DEFAULT_MODEL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl From<&Config> for LlmConfig {
    fn from(config: &Config) -> Self {
        Self {
            provider: config.llm_provider.clone(),
            base_url: Some(config.ollama_base_url.clone()),
            default_model: config.llm_model.clone(),
            timeout_secs: config.llm_timeout_secs,
        }
    }
}

/// Text-generation backend
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Send one prompt and return the completion
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model used when a request leaves `model` empty
    fn default_model(&self) -> &str;
}

/// Factory for creating LlmService implementations
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    pub fn create(config: LlmConfig) -> Result<Box<dyn LlmService>, LlmError> {
        match config.provider.as_str() {
            "ollama" => {
                tracing::info!(model = %config.default_model, "Creating Ollama LLM service");
                Ok(Box::new(ollama::OllamaService::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock LLM service");
                Ok(Box::new(mock::MockLlmService::new()))
            }
            provider => Err(LlmError::Configuration(format!(
                "Unknown LLM provider: {}. Supported providers: ollama, mock",
                provider
            ))),
        }
    }
}
