//! Ad-hoc text translation handler

use axum::{extract::State, Json};
use filechat_common::{run_to_completion, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::FilesState;

#[derive(Debug, Deserialize, Validate)]
pub struct TranslateTextRequest {
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1))]
    pub target_language: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateTextResponse {
    pub message: String,
    pub translated_content: String,
}

/// Translate a snippet of text without touching the store
pub async fn translate_text(
    State(state): State<FilesState>,
    ValidatedJson(req): ValidatedJson<TranslateTextRequest>,
) -> Result<Json<TranslateTextResponse>> {
    let engine = state.engine.clone();
    let translated_content = run_to_completion(async move {
        engine
            .translate_text(&req.content, &req.target_language)
            .await
    })
    .await?;

    Ok(Json(TranslateTextResponse {
        message: "Translation completed successfully.".to_string(),
        translated_content,
    }))
}
