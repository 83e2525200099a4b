//! Domain entities for the Chat domain
//!
//! A chat exchange is transient: one message in, one completion out. Nothing
//! is stored and there is no conversation history.

use filechat_common::Error;
use filechat_llm::{LlmError, ModelGateway};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage,

    #[error(transparent)]
    Model(#[from] LlmError),
}

impl From<ChatError> for Error {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyMessage => Error::Validation(err.to_string()),
            ChatError::Model(_) => Error::Model(err.to_string()),
        }
    }
}

/// A single user message, optionally to be translated instead of answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    message: String,
    target_language: Option<String>,
}

/// What the model produced for an exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Response(String),
    Translation(String),
}

impl ChatExchange {
    /// Build an exchange. A blank `target_language` means plain chat.
    pub fn new(message: String, target_language: Option<String>) -> Result<Self, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let target_language = target_language.filter(|l| !l.trim().is_empty());
        Ok(Self {
            message,
            target_language,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn target_language(&self) -> Option<&str> {
        self.target_language.as_deref()
    }

    /// Send the exchange through the gateway. One attempt.
    pub async fn send(&self, gateway: &ModelGateway) -> Result<ChatReply, ChatError> {
        let reply = match self.target_language() {
            Some(language) => {
                ChatReply::Translation(gateway.translate_message(&self.message, language).await?)
            }
            None => ChatReply::Response(gateway.chat(&self.message).await?),
        };

        tracing::debug!(
            translated = matches!(reply, ChatReply::Translation(_)),
            "Chat exchange answered"
        );
        Ok(reply)
    }
}
