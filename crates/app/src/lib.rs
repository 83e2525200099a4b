//! Filechat application composition root
//!
//! Composes all domain routers into a single application.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use filechat_chat::ChatState;
use filechat_common::{Config, Error};
use filechat_files::{DerivationEngine, FileRules, FileStore, FilesState};
use filechat_llm::{LlmConfig, LlmService, LlmServiceFactory, ModelGateway};
use serde_json::{json, Value};
use tower_http::limit::RequestBodyLimitLayer;

/// Largest request body accepted, uploads included
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with the configured model backend
pub async fn create_app(config: Config) -> Result<Router, anyhow::Error> {
    let llm = LlmServiceFactory::create(LlmConfig::from(&config))?;
    create_app_with_llm(config, Arc::from(llm)).await
}

/// Create the application router around an already built model backend
pub async fn create_app_with_llm(
    config: Config,
    llm: Arc<dyn LlmService>,
) -> Result<Router, anyhow::Error> {
    let gateway = ModelGateway::new(llm);

    let store = FileStore::new(config.uploads_dir.clone());
    store.ensure_root().await?;
    tracing::info!(
        root = %store.root().display(),
        model = %gateway.model(),
        "Content store ready"
    );

    let engine = DerivationEngine::new(
        store,
        gateway.clone(),
        FileRules::with_max_chars(config.max_content_chars),
    );

    let files_state = FilesState {
        engine: Arc::new(engine),
        default_target_language: config.default_target_language.clone(),
    };
    let chat_state = ChatState { gateway };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/", get(welcome))
        .merge(filechat_files::routes().with_state(files_state))
        .merge(filechat_chat::routes().with_state(chat_state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

    Ok(app)
}

async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Filechat API" }))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> Error {
    Error::NotFound("Route not found".to_string())
}
