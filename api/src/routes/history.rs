//! GET /history and POST /clear-history.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use chat_core::ConversationTurn;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
};

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(default = "default_session")]
    pub session_id: String,
}

fn default_session() -> String {
    "default".to_string()
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub history: Vec<ConversationTurn>,
}

/// Handler: GET /history?session_id=...
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SessionQuery>,
) -> AppResult<Json<ApiResponse<HistoryResponse>>> {
    let session = state.registry.get_or_create(&q.session_id).await;
    let history = session.lock().await.history();

    Ok(Json(ApiResponse::success(HistoryResponse {
        session_id: q.session_id,
        history,
    })))
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub message: &'static str,
    pub session_id: String,
    pub timestamp: String,
}

/// Handler: POST /clear-history?session_id=...
pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SessionQuery>,
) -> AppResult<Json<ApiResponse<ClearedResponse>>> {
    let session = state.registry.get_or_create(&q.session_id).await;
    session.lock().await.clear_history();

    Ok(Json(ApiResponse::success(ClearedResponse {
        message: "History cleared",
        session_id: q.session_id,
        timestamp: Utc::now().to_rfc3339(),
    })))
}
