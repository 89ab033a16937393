//! GET /stats — corpus and model statistics.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
};

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_documents: u64,
    pub collection: String,
    pub embedder_model: String,
    pub llm_model: String,
    pub max_history: usize,
    pub active_sessions: usize,
}

/// Handler: GET /stats
pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<StatsResponse>>> {
    let pipeline = state.registry.pipeline();
    let total_documents = pipeline.document_count().await?;

    Ok(Json(ApiResponse::success(StatsResponse {
        total_documents,
        collection: state.store.collection().to_string(),
        embedder_model: state.embedding_model.clone(),
        llm_model: pipeline.model_name().to_string(),
        max_history: pipeline.config().max_history,
        active_sessions: state.registry.count().await,
    })))
}
