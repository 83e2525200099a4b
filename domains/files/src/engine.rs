//! Derivation Engine
//!
//! Orchestrates validator, store, and model gateway to produce summary and
//! translation artifacts. Validation always runs before anything is stored
//! or sent to the model, and a derived file is only written once the model
//! has returned a usable completion.

use std::path::PathBuf;

use chrono::Utc;
use filechat_llm::ModelGateway;

use crate::domain::entities::{
    derived_filename, ArtifactKind, DerivedArtifact, Operation, StoredFile,
};
use crate::domain::filename::Filename;
use crate::domain::state::{DerivationEvent, DerivationTracker};
use crate::domain::validation::{FileRules, ValidationError};
use crate::error::FileError;
use crate::repository::FileStore;

/// Result of the upload-then-derive composite
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// Where the original upload was written
    pub stored_path: PathBuf,
    /// Present unless the operation was `Operation::Store`
    pub artifact: Option<DerivedArtifact>,
}

pub struct DerivationEngine {
    store: FileStore,
    gateway: ModelGateway,
    rules: FileRules,
}

impl DerivationEngine {
    pub fn new(store: FileStore, gateway: ModelGateway, rules: FileRules) -> Self {
        Self {
            store,
            gateway,
            rules,
        }
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    pub fn rules(&self) -> &FileRules {
        &self.rules
    }

    /// Summarize a file that is already stored
    pub async fn summarize_file(&self, filename: &Filename) -> Result<DerivedArtifact, FileError> {
        let mut tracker = DerivationTracker::from_stored();
        let result = self
            .derive_stored(&mut tracker, filename, ArtifactKind::Summary, None)
            .await;
        finish(&mut tracker, result)
    }

    /// Translate a file that is already stored
    pub async fn translate_file(
        &self,
        filename: &Filename,
        target_language: &str,
    ) -> Result<DerivedArtifact, FileError> {
        let mut tracker = DerivationTracker::from_stored();
        let result = self
            .derive_stored(
                &mut tracker,
                filename,
                ArtifactKind::Translation,
                Some(target_language),
            )
            .await;
        finish(&mut tracker, result)
    }

    /// Translate ad-hoc text. Nothing is read from or written to the store.
    pub async fn translate_text(
        &self,
        content: &str,
        target_language: &str,
    ) -> Result<String, FileError> {
        if content.trim().is_empty() {
            return Err(ValidationError::Empty.into());
        }
        if target_language.trim().is_empty() {
            return Err(FileError::InvalidLanguage(target_language.to_string()));
        }

        let translated = self
            .gateway
            .translate_message(content, target_language)
            .await?;
        Ok(translated)
    }

    /// Validate and store new content, then run the requested derivation.
    ///
    /// A validation failure returns before the store or the model is touched.
    pub async fn ingest_and_derive(
        &self,
        file: StoredFile,
        operation: Operation,
    ) -> Result<IngestOutcome, FileError> {
        let mut tracker = DerivationTracker::received();
        let result = self.ingest(&mut tracker, file, operation).await;
        finish(&mut tracker, result)
    }

    async fn ingest(
        &self,
        tracker: &mut DerivationTracker,
        file: StoredFile,
        operation: Operation,
    ) -> Result<IngestOutcome, FileError> {
        self.rules.validate(&file)?;
        // The artifact name covers the language token and the length limit,
        // so a request that cannot finish is rejected before anything is written
        let target = match operation.kind() {
            Some(kind) => Some((
                kind,
                derived_filename(&file.filename, kind, operation.target_language())?,
            )),
            None => None,
        };
        tracker.advance(DerivationEvent::Validate)?;

        let stored_path = self.store.save(&file.filename, &file.content).await?;
        tracker.advance(DerivationEvent::Persist)?;

        let artifact = match target {
            None => {
                tracker.advance(DerivationEvent::Complete)?;
                None
            }
            Some((kind, target)) => Some(
                self.derive(
                    tracker,
                    &file.filename,
                    target,
                    kind,
                    operation.target_language(),
                )
                .await?,
            ),
        };

        Ok(IngestOutcome {
            stored_path,
            artifact,
        })
    }

    /// Derive from a file already in the store
    async fn derive_stored(
        &self,
        tracker: &mut DerivationTracker,
        source: &Filename,
        kind: ArtifactKind,
        language: Option<&str>,
    ) -> Result<DerivedArtifact, FileError> {
        // Naming errors surface before the model is called
        let target = derived_filename(source, kind, language)?;
        self.derive(tracker, source, target, kind, language).await
    }

    /// Persisted → Derived → Completed for one artifact
    async fn derive(
        &self,
        tracker: &mut DerivationTracker,
        source: &Filename,
        target: Filename,
        kind: ArtifactKind,
        language: Option<&str>,
    ) -> Result<DerivedArtifact, FileError> {
        let content = self.store.read(source).await?;

        let derived = match (kind, language) {
            (ArtifactKind::Summary, _) => self.gateway.summarize(&content).await?,
            (ArtifactKind::Translation, Some(lang)) => {
                self.gateway.translate(&content, lang).await?
            }
            (ArtifactKind::Translation, None) => {
                return Err(FileError::InvalidLanguage(String::new()))
            }
        };
        tracker.advance(DerivationEvent::Derive)?;

        let path = self.store.save(&target, &derived).await?;
        tracker.advance(DerivationEvent::Complete)?;

        tracing::info!(
            request_id = %tracker.id,
            source = %source,
            kind = %kind,
            path = %path.display(),
            "Derived artifact saved"
        );

        Ok(DerivedArtifact {
            source_filename: source.clone(),
            kind,
            target_language: language.map(str::to_string),
            filename: target,
            content: derived,
            path,
            created_at: Utc::now(),
        })
    }
}

/// Record a failure on the tracker before handing the result back
fn finish<T>(tracker: &mut DerivationTracker, result: Result<T, FileError>) -> Result<T, FileError> {
    if let Err(ref e) = result {
        tracker.fail(e.to_string());
        tracing::warn!(request_id = %tracker.id, kind = e.kind(), error = %e, "Derivation request failed");
    }
    result
}
