//! Chat API handler

use axum::{extract::State, Json};
use filechat_common::{run_to_completion, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::ChatState;
use crate::domain::entities::{ChatExchange, ChatReply};

/// Request for a single chat turn
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1))]
    pub message: String,
    /// When present and non-blank, the message is translated instead
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ChatResponse {
    Response { response: String },
    Translation { translated_content: String },
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        match reply {
            ChatReply::Response(response) => ChatResponse::Response { response },
            ChatReply::Translation(translated_content) => {
                ChatResponse::Translation { translated_content }
            }
        }
    }
}

/// Send a message to the model, or translate it
pub async fn send_message(
    State(state): State<ChatState>,
    ValidatedJson(req): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let exchange = ChatExchange::new(req.message, req.target_language)?;
    let gateway = state.gateway.clone();
    let reply = run_to_completion(async move { exchange.send(&gateway).await }).await?;
    Ok(Json(reply.into()))
}
