//! Files domain: validation, content store, summary and translation derivation

pub mod api;
pub mod domain;
pub mod engine;
pub mod error;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{ArtifactKind, DerivedArtifact, Operation, StoredFile};
pub use domain::filename::Filename;
pub use domain::state::{DerivationEvent, DerivationState, DerivationTracker};
pub use domain::validation::{FileRules, ValidationError};

pub use engine::{DerivationEngine, IngestOutcome};
pub use error::FileError;
pub use repository::FileStore;

// Re-export API types
pub use api::routes;
pub use api::FilesState;
