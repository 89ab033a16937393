//! Session lifecycle endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Serialize;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
};

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<String>,
    pub count: usize,
    pub timestamp: String,
}

/// Handler: GET /sessions
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<SessionsResponse>> {
    let sessions = state.registry.list().await;
    let count = sessions.len();
    Json(ApiResponse::success(SessionsResponse {
        sessions,
        count,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
    pub timestamp: String,
}

/// Handler: DELETE /session/{session_id}
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedResponse>>> {
    if !state.registry.close(&session_id).await {
        return Err(AppError::NotFound(format!("session {session_id}")));
    }

    Ok(Json(ApiResponse::success(DeletedResponse {
        message: format!("Session {session_id} deleted"),
        timestamp: Utc::now().to_rfc3339(),
    })))
}
