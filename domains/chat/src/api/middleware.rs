//! Chat domain state

use filechat_llm::ModelGateway;

/// Application state for the Chat domain
#[derive(Clone)]
pub struct ChatState {
    pub gateway: ModelGateway,
}
