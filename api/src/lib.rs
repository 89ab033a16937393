//! HTTP surface for the FAQ-aware chat backend.

use std::env;
use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub mod core;
pub mod error_handler;
mod routes;

use crate::core::app_state::AppState;
use crate::error_handler::{AppError, AppResult};

/// Builds the application state from the environment and serves the API
/// until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8000".into());

    let state = Arc::new(AppState::from_env()?);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .route("/health/llm", get(routes::health::health_llm))
        .route("/chat", post(routes::chat::chat))
        .route("/history", get(routes::history::get_history))
        .route("/clear-history", post(routes::history::clear_history))
        .route("/sessions", get(routes::sessions::list_sessions))
        .route("/session/{session_id}", delete(routes::sessions::delete_session))
        .route("/stats", get(routes::stats::stats))
        .route("/ingest", post(routes::ingest::ingest))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!("API listening on {host_url}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
