//! Mock LLM Service Implementation
//!
//! Programmable mock used by `LlmServiceFactory` when provider is `"mock"`
//! and by tests that need to control or observe the model backend:
//! - `MockOutcome`: Echo, Reply, Incomplete, or Unavailable
//! - request recording for "was the model called?" assertions

use std::sync::{Arc, Mutex, RwLock};

use crate::{CompletionRequest, CompletionResponse, LlmError, LlmService};

/// What the mock should answer
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MockOutcome {
    /// Answer `Mock response to: <prompt>`
    #[default]
    Echo,
    /// Answer with fixed text
    Reply(String),
    /// Answer without a usable result field
    Incomplete,
    /// Behave as if the backend were down
    Unavailable,
}

/// Mock LLM service with programmable behavior.
///
/// Clones share outcome and history, so a test can keep one handle while the
/// service under test holds another.
#[derive(Debug, Clone, Default)]
pub struct MockLlmService {
    outcome: Arc<RwLock<MockOutcome>>,
    history: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmService {
    /// Create a new mock LLM service
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(outcome: MockOutcome) -> Self {
        let service = Self::new();
        service.set_outcome(outcome);
        service
    }

    /// Configure the mock outcome
    pub fn set_outcome(&self, outcome: MockOutcome) {
        *self.outcome.write().unwrap_or_else(|e| e.into_inner()) = outcome;
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of completion calls received
    pub fn call_count(&self) -> usize {
        self.history.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        tracing::info!("Mock LLM service processing completion request");

        let model = if request.model.is_empty() {
            self.default_model().to_string()
        } else {
            request.model.clone()
        };

        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        let outcome = self
            .outcome
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        let content = match outcome {
            MockOutcome::Echo => format!("Mock response to: {}", request.prompt),
            MockOutcome::Reply(text) => text,
            MockOutcome::Incomplete => {
                return Err(LlmError::IncompleteResponse(
                    "Response has no `response` field".to_string(),
                ))
            }
            MockOutcome::Unavailable => {
                return Err(LlmError::Unavailable(
                    "Mock backend is offline".to_string(),
                ))
            }
        };

        Ok(CompletionResponse { content, model })
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }
}
