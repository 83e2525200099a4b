//! Files domain state

use std::sync::Arc;

use crate::engine::DerivationEngine;

/// Application state for the Files domain
#[derive(Clone)]
pub struct FilesState {
    pub engine: Arc<DerivationEngine>,
    /// Used when a multipart translate request omits `target_language`
    pub default_target_language: String,
}
