//! Prompt construction and the gateway handle passed to the file pipeline

use std::sync::Arc;

use crate::{CompletionRequest, LlmError, LlmService};

/// Task-specific instruction prefixed to the source content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Summarize,
    Translate { language: String },
    /// Shorter form used for ad-hoc chat translation
    TranslateMessage { language: String },
    /// Message forwarded verbatim
    Chat,
}

impl Instruction {
    /// Build the single prompt string sent to the model
    pub fn prompt(&self, content: &str) -> String {
        match self {
            Instruction::Summarize => format!("Summarize the following content: {}", content),
            Instruction::Translate { language } => {
                format!("Translate the following content to {}: {}", language, content)
            }
            Instruction::TranslateMessage { language } => {
                format!("Translate to {}: {}", language, content)
            }
            Instruction::Chat => content.to_string(),
        }
    }
}

/// Explicitly constructed handle to the model backend.
///
/// Cheap to clone; one attempt per call, no retries, no backoff.
#[derive(Clone)]
pub struct ModelGateway {
    service: Arc<dyn LlmService>,
}

impl ModelGateway {
    pub fn new(service: Arc<dyn LlmService>) -> Self {
        Self { service }
    }

    /// Model identifier requests are sent to
    pub fn model(&self) -> &str {
        self.service.default_model()
    }

    /// Run `instruction` over `content` and return the completion text.
    ///
    /// A blank completion is reported as `IncompleteResponse`; callers never
    /// see an empty string as a successful result.
    pub async fn run(&self, instruction: &Instruction, content: &str) -> Result<String, LlmError> {
        self.complete(instruction.prompt(content)).await
    }

    /// Send an already assembled prompt
    pub async fn complete(&self, prompt: String) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: self.service.default_model().to_string(),
            prompt,
        };

        let response = self.service.complete(request).await.map_err(|e| {
            tracing::error!(error = %e, "Model gateway call failed");
            e
        })?;

        if response.content.trim().is_empty() {
            return Err(LlmError::IncompleteResponse(
                "Model returned an empty completion".to_string(),
            ));
        }

        Ok(response.content)
    }

    pub async fn summarize(&self, content: &str) -> Result<String, LlmError> {
        self.run(&Instruction::Summarize, content).await
    }

    pub async fn translate(&self, content: &str, language: &str) -> Result<String, LlmError> {
        self.run(
            &Instruction::Translate {
                language: language.to_string(),
            },
            content,
        )
        .await
    }

    pub async fn translate_message(
        &self,
        content: &str,
        language: &str,
    ) -> Result<String, LlmError> {
        self.run(
            &Instruction::TranslateMessage {
                language: language.to_string(),
            },
            content,
        )
        .await
    }

    pub async fn chat(&self, message: &str) -> Result<String, LlmError> {
        self.run(&Instruction::Chat, message).await
    }
}
