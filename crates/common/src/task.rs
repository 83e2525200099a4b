//! Detached execution for request work that must not be cancelled

use std::future::Future;

use crate::{Error, Result};

/// Run a pipeline step on its own task and wait for it.
///
/// If the client disconnects, the handler future is dropped but the spawned
/// task still finishes its store writes and model calls.
pub async fn run_to_completion<F, T, E>(task: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    tokio::spawn(task)
        .await
        .map_err(|e| Error::Internal(format!("Request task failed: {}", e)))?
        .map_err(Into::into)
}
