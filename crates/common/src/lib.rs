//! Shared utilities, configuration, and error handling for Filechat
//!
//! This crate provides common functionality used across the Filechat service:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Request extractors
//! - State machine error types
//! - Spawn-and-join helper for request work

pub mod config;
pub mod error;
pub mod extractors;
pub mod state;
pub mod task;

pub use config::Config;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
pub use state::StateError;
pub use task::run_to_completion;
