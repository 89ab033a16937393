//! POST /chat — one conversational turn through the FAQ-aware pipeline.

use std::sync::Arc;

use axum::{Json, extract::State};
use chat_core::ChatOptions;
use chrono::Utc;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::chat_dto::{ChatRequest, ChatResponse},
};

/// Handler: POST /chat
///
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"How do I apply for a scholarship?","session_id":"demo"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ApiResponse<ChatResponse>>> {
    if body.message.chars().count() > 4000 {
        return Err(AppError::BadRequest("message exceeds 4000 characters".into()));
    }

    let mut opts = ChatOptions::default();
    if let Some(k) = body.top_k {
        opts.top_k = k;
    }
    if let Some(t) = body.temperature {
        opts.temperature = t;
    }
    opts.use_rag = body.use_rag;

    let session = state.registry.get_or_create(&body.session_id).await;
    let result = session.lock().await.chat(&body.message, opts).await?;

    Ok(Json(ApiResponse::success(ChatResponse {
        answer: result.answer,
        session_id: body.session_id,
        match_type: result.match_tier,
        context_type: result.context_kind,
        best_faq_similarity: result.best_faq_similarity,
        relevant_documents: result.relevant_documents,
        error: result.error,
        timestamp: Utc::now().to_rfc3339(),
    })))
}
