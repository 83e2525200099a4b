//! File upload, summary, and translation API handlers

use axum::{
    extract::{Multipart, State},
    Json,
};
use filechat_common::extractors::Submission;
use filechat_common::{run_to_completion, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::UploadForm;
use crate::api::middleware::FilesState;
use crate::domain::entities::{DerivedArtifact, Operation};
use crate::domain::filename::Filename;
use crate::error::FileError;

/// Request for summarizing a stored file
#[derive(Debug, Deserialize, Validate)]
pub struct SummarizeByNameRequest {
    #[validate(length(min = 1))]
    pub filename: String,
}

/// Request for translating a stored file
#[derive(Debug, Deserialize, Validate)]
pub struct TranslateByNameRequest {
    #[validate(length(min = 1))]
    pub filename: String,
    #[validate(length(min = 1))]
    pub target_language: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub file_path: String,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryBody {
    pub summary_file_path: String,
    pub summary_content: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub message: String,
    pub summary: SummaryBody,
}

impl From<DerivedArtifact> for SummaryResponse {
    fn from(a: DerivedArtifact) -> Self {
        Self {
            message: "Summary generated successfully.".to_string(),
            summary: SummaryBody {
                summary_file_path: a.path.display().to_string(),
                summary_content: a.content,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    pub message: String,
    pub translated_file_path: String,
    pub translated_content: String,
}

impl From<DerivedArtifact> for TranslationResponse {
    fn from(a: DerivedArtifact) -> Self {
        Self {
            message: "Translation completed successfully.".to_string(),
            translated_file_path: a.path.display().to_string(),
            translated_content: a.content,
        }
    }
}

/// Artifact produced by an ingest that asked for a derivation
fn derived(artifact: Option<DerivedArtifact>) -> Result<DerivedArtifact> {
    artifact.ok_or_else(|| {
        filechat_common::Error::Internal("Derivation produced no artifact".to_string())
    })
}

/// Upload a text file into the content root
pub async fn upload_file(
    State(state): State<FilesState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let file = UploadForm::read(multipart).await?.into_stored_file()?;

    let engine = state.engine.clone();
    let outcome =
        run_to_completion(async move { engine.ingest_and_derive(file, Operation::Store).await })
            .await?;

    Ok(Json(UploadResponse {
        message: "File saved successfully.".to_string(),
        file_path: outcome.stored_path.display().to_string(),
    }))
}

/// List original and derived files in the content root
pub async fn list_files(State(state): State<FilesState>) -> Result<Json<ListResponse>> {
    let files = state.engine.store().list().await?;
    Ok(Json(ListResponse { files }))
}

/// Summarize either a freshly uploaded file or one already stored
pub async fn summarize_file(
    State(state): State<FilesState>,
    submission: Submission<SummarizeByNameRequest>,
) -> Result<Json<SummaryResponse>> {
    let engine = state.engine.clone();

    let artifact = match submission {
        Submission::Upload(multipart) => {
            let file = UploadForm::read(multipart).await?.into_stored_file()?;
            let outcome = run_to_completion(async move {
                engine.ingest_and_derive(file, Operation::Summarize).await
            })
            .await?;
            derived(outcome.artifact)?
        }
        Submission::Json(req) => {
            let filename = Filename::parse(req.filename)?;
            ensure_exists(&state, &filename).await?;
            run_to_completion(async move { engine.summarize_file(&filename).await }).await?
        }
    };

    Ok(Json(artifact.into()))
}

/// Translate either a freshly uploaded file or one already stored
pub async fn translate_file(
    State(state): State<FilesState>,
    submission: Submission<TranslateByNameRequest>,
) -> Result<Json<TranslationResponse>> {
    let engine = state.engine.clone();

    let artifact = match submission {
        Submission::Upload(multipart) => {
            let form = UploadForm::read(multipart).await?;
            let language = form
                .target_language
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| state.default_target_language.clone());
            let file = form.into_stored_file()?;
            let outcome = run_to_completion(async move {
                engine
                    .ingest_and_derive(file, Operation::Translate { language })
                    .await
            })
            .await?;
            derived(outcome.artifact)?
        }
        Submission::Json(req) => {
            let filename = Filename::parse(req.filename)?;
            ensure_exists(&state, &filename).await?;
            let language = req.target_language;
            run_to_completion(async move { engine.translate_file(&filename, &language).await })
                .await?
        }
    };

    Ok(Json(artifact.into()))
}

/// By-name requests answer 404 before any work is scheduled
async fn ensure_exists(state: &FilesState, filename: &Filename) -> Result<()> {
    if state.engine.store().exists(filename).await? {
        Ok(())
    } else {
        Err(FileError::NotFound(filename.to_string()).into())
    }
}
