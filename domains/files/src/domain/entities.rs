//! Domain entities for the Files domain
//!
//! Original uploads (`StoredFile`) and the summary/translation files derived
//! from them (`DerivedArtifact`), plus the naming rule that links the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::filename::Filename;
use crate::error::FileError;

/// Used when a source name has no extension of its own
const FALLBACK_EXTENSION: &str = "txt";

/// An uploaded text file. Validated before it is persisted, never mutated after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub filename: Filename,
    pub content: String,
}

impl StoredFile {
    pub fn new(filename: Filename, content: String) -> Self {
        Self { filename, content }
    }
}

/// Kind of derived artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Summary,
    Translation,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Summary => write!(f, "summary"),
            ArtifactKind::Translation => write!(f, "translation"),
        }
    }
}

/// What to do with content once it is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Persist only (plain upload)
    Store,
    Summarize,
    Translate { language: String },
}

impl Operation {
    /// Derivation performed after storage, if any
    pub fn kind(&self) -> Option<ArtifactKind> {
        match self {
            Operation::Store => None,
            Operation::Summarize => Some(ArtifactKind::Summary),
            Operation::Translate { .. } => Some(ArtifactKind::Translation),
        }
    }

    pub fn target_language(&self) -> Option<&str> {
        match self {
            Operation::Translate { language } => Some(language.as_str()),
            _ => None,
        }
    }
}

/// A summary or translation written next to its source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedArtifact {
    pub source_filename: Filename,
    pub kind: ArtifactKind,
    pub target_language: Option<String>,
    pub filename: Filename,
    pub content: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
}

/// Name of the artifact derived from `source`.
///
/// The source extension is replaced by `.summary.<ext>` or
/// `.translated.<lang>.<ext>`. The language token is embedded verbatim, so
/// `fr` and `FR` produce two distinct artifacts.
pub fn derived_filename(
    source: &Filename,
    kind: ArtifactKind,
    language: Option<&str>,
) -> Result<Filename, FileError> {
    let (stem, ext) = source.split_extension();
    let ext = ext.unwrap_or(FALLBACK_EXTENSION);

    let name = match (kind, language) {
        (ArtifactKind::Summary, _) => format!("{}.summary.{}", stem, ext),
        (ArtifactKind::Translation, Some(lang)) => {
            let lang = checked_language(lang)?;
            format!("{}.translated.{}.{}", stem, lang, ext)
        }
        (ArtifactKind::Translation, None) => {
            return Err(FileError::InvalidLanguage(String::new()));
        }
    };

    Filename::parse(name)
}

/// A language token must be usable inside a filename
pub fn checked_language(language: &str) -> Result<&str, FileError> {
    let trimmed = language.trim();
    let usable = !trimmed.is_empty()
        && trimmed == language
        && !language.contains(&['/', '\\', '.'][..])
        && !language.chars().any(char::is_control);

    if usable {
        Ok(language)
    } else {
        Err(FileError::InvalidLanguage(language.to_string()))
    }
}
