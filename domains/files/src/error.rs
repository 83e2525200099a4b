//! Error taxonomy for the file pipeline

use filechat_common::{Error, StateError};
use filechat_llm::LlmError;
use thiserror::Error;

use crate::domain::validation::ValidationError;

#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid filename '{name}': {reason}")]
    InvalidFilename { name: String, reason: &'static str },

    #[error("invalid target language '{0}'")]
    InvalidLanguage(String),

    #[error("file does not exist: {0}")]
    NotFound(String),

    #[error("storage failure while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("model backend unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("incomplete response from model backend: {0}")]
    IncompleteResponse(String),

    #[error(transparent)]
    State(#[from] StateError),
}

impl FileError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        FileError::Io {
            context: context.into(),
            source,
        }
    }

    /// Stable machine-readable kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            FileError::Validation(ValidationError::InvalidExtension { .. }) => "invalid_extension",
            FileError::Validation(ValidationError::TooLarge { .. }) => "too_large",
            FileError::Validation(ValidationError::Empty) => "empty",
            FileError::InvalidFilename { .. } => "invalid_filename",
            FileError::InvalidLanguage(_) => "invalid_language",
            FileError::NotFound(_) => "not_found",
            FileError::Io { .. } => "io_failure",
            FileError::GatewayUnavailable(_) => "gateway_unavailable",
            FileError::IncompleteResponse(_) => "incomplete_response",
            FileError::State(_) => "state",
        }
    }
}

impl From<LlmError> for FileError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Unavailable(msg) | LlmError::Configuration(msg) => {
                FileError::GatewayUnavailable(msg)
            }
            LlmError::IncompleteResponse(msg) => FileError::IncompleteResponse(msg),
        }
    }
}

impl From<FileError> for Error {
    fn from(err: FileError) -> Self {
        match err {
            FileError::Validation(_)
            | FileError::InvalidFilename { .. }
            | FileError::InvalidLanguage(_) => Error::Validation(err.to_string()),
            FileError::NotFound(_) => Error::NotFound(err.to_string()),
            FileError::Io { .. } => Error::Storage(err.to_string()),
            FileError::GatewayUnavailable(_) | FileError::IncompleteResponse(_) => {
                Error::Model(err.to_string())
            }
            FileError::State(_) => Error::Internal(err.to_string()),
        }
    }
}
