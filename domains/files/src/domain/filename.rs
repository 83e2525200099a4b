//! Sanitized filename used as the key into the content root
//!
//! Every store path is built from a `Filename`, so a name that could escape
//! the root never reaches the filesystem.

use serde::Serialize;
use std::fmt;

use crate::error::FileError;

/// Longest name accepted, in bytes (common filesystem limit)
pub const MAX_FILENAME_BYTES: usize = 255;

/// A single path component that cannot escape the content root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Filename(String);

impl Filename {
    /// Validate and wrap a raw filename
    pub fn parse(raw: impl Into<String>) -> Result<Self, FileError> {
        let name = raw.into();
        let reject = |reason: &'static str| FileError::InvalidFilename {
            name: name.clone(),
            reason,
        };

        if name.is_empty() {
            return Err(reject("name is empty"));
        }
        if name.len() > MAX_FILENAME_BYTES {
            return Err(reject("name is too long"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(reject("path separators are not allowed"));
        }
        if name == "." || name.contains("..") {
            return Err(reject("parent directory reference"));
        }
        if name.chars().any(char::is_control) {
            return Err(reject("control characters are not allowed"));
        }
        if name.starts_with('.') {
            return Err(reject("hidden names are reserved"));
        }

        Ok(Filename(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into stem and extension at the last dot.
    ///
    /// Returns `None` for the extension when the name has no dot.
    pub fn split_extension(&self) -> (&str, Option<&str>) {
        match self.0.rfind('.') {
            Some(idx) => (&self.0[..idx], Some(&self.0[idx + 1..])),
            None => (&self.0, None),
        }
    }
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Filename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
