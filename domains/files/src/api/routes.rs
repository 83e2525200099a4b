//! Route definitions for Files domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{files, translate};
use super::middleware::FilesState;

/// Create file routes
fn file_routes() -> Router<FilesState> {
    Router::new()
        .route("/file/upload", post(files::upload_file))
        .route("/file/list", get(files::list_files))
        .route("/file/summary", post(files::summarize_file))
        .route("/file/translate", post(files::translate_file))
}

/// Create ad-hoc translation routes
fn text_routes() -> Router<FilesState> {
    Router::new().route("/chat/translate", post(translate::translate_text))
}

/// Create all Files domain API routes
pub fn routes() -> Router<FilesState> {
    Router::new().merge(file_routes()).merge(text_routes())
}
