//! Chat domain: single-turn passthrough to the model backend

pub mod api;
pub mod domain;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{ChatError, ChatExchange, ChatReply};

// Re-export API types
pub use api::routes;
pub use api::ChatState;
