//! Ollama Implementation
//!
//! Calls the Ollama generate API (`POST {base_url}/api/generate`) with
//! streaming disabled, using the reqwest HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{CompletionRequest, CompletionResponse, LlmConfig, LlmError, LlmService};

/// Default Ollama server URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Ollama generate API request body
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Ollama generate API response body.
///
/// Every field is optional so that a body missing `response` is reported
/// as incomplete instead of failing deserialization.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
    model: Option<String>,
    error: Option<String>,
}

/// Ollama LLM service implementation
pub struct OllamaService {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

impl OllamaService {
    /// Create a new Ollama service
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl LlmService for OllamaService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.config.default_model.as_str()
        } else {
            request.model.as_str()
        };

        let body = GenerateRequest {
            model,
            prompt: &request.prompt,
            stream: false,
        };

        let url = format!("{}/api/generate", self.base_url);

        tracing::debug!(model = %model, prompt_chars = request.prompt.chars().count(), "Sending Ollama generate request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    LlmError::Unavailable(format!(
                        "Ollama server not reachable at {}",
                        self.base_url
                    ))
                } else if e.is_timeout() {
                    LlmError::Unavailable(format!(
                        "Ollama request timed out after {}s",
                        self.config.timeout_secs
                    ))
                } else {
                    LlmError::Unavailable(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Unavailable(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            // Ollama reports unknown models and load failures as {"error": "..."}
            let detail = serde_json::from_str::<GenerateResponse>(&text)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(text);
            return Err(LlmError::Unavailable(format!(
                "Ollama returned {}: {}",
                status, detail
            )));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            LlmError::IncompleteResponse(format!("Response is not valid JSON: {}", e))
        })?;

        if let Some(error) = parsed.error {
            return Err(LlmError::Unavailable(format!("Ollama error: {}", error)));
        }

        let content = parsed.response.ok_or_else(|| {
            LlmError::IncompleteResponse("Response has no `response` field".to_string())
        })?;

        Ok(CompletionResponse {
            content,
            model: parsed.model.unwrap_or_else(|| model.to_string()),
        })
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
