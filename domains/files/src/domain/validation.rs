//! Acceptance rules applied to an uploaded file before it is persisted

use filechat_common::config::DEFAULT_MAX_CONTENT_CHARS;
use thiserror::Error;

use crate::domain::entities::StoredFile;

/// Only plain text is accepted
pub const ACCEPTED_EXTENSION: &str = ".txt";

/// Reasons a candidate file is rejected. Never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("file must have the {extension} extension")]
    InvalidExtension { extension: &'static str },

    #[error("file exceeds the limit of {max} characters")]
    TooLarge { max: usize },

    #[error("file content is empty")]
    Empty,
}

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRules {
    pub extension: &'static str,
    /// Maximum content length in characters (not bytes)
    pub max_chars: usize,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            extension: ACCEPTED_EXTENSION,
            max_chars: DEFAULT_MAX_CONTENT_CHARS,
        }
    }
}

impl FileRules {
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            max_chars,
            ..Self::default()
        }
    }

    /// Check rules in order: extension, size, emptiness. First failure wins.
    pub fn validate(&self, file: &StoredFile) -> Result<(), ValidationError> {
        if !file.filename.as_str().ends_with(self.extension) {
            return Err(ValidationError::InvalidExtension {
                extension: self.extension,
            });
        }

        // Counting stops one past the limit so huge bodies are not walked in full
        if file.content.chars().take(self.max_chars.saturating_add(1)).count() > self.max_chars {
            return Err(ValidationError::TooLarge {
                max: self.max_chars,
            });
        }

        if file.content.is_empty() {
            return Err(ValidationError::Empty);
        }

        Ok(())
    }
}
