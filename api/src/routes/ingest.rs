//! POST /ingest — (re)index the markdown docs folder.

use std::sync::Arc;

use axum::{Json, extract::State};
use doc_store::{IngestOptions, ingest_dir};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
};

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// Drop every stored record before ingesting.
    #[serde(default)]
    pub fresh: bool,
    /// Split long documents into overlapping chunks.
    #[serde(default = "default_true")]
    pub chunk_documents: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub processed: usize,
    pub skipped: usize,
    pub total_files: usize,
    pub deleted: u64,
}

/// Handler: POST /ingest
pub async fn ingest(
    State(state): State<Arc<AppState>>,
    Json(body): Json<IngestRequest>,
) -> AppResult<Json<ApiResponse<IngestResponse>>> {
    use doc_store::VectorIndex;

    state.store.ensure_collection().await?;

    let deleted = if body.fresh {
        let n = state.store.delete_all().await?;
        info!("Fresh ingest requested, {n} records deleted");
        n
    } else {
        0
    };

    let opts = IngestOptions {
        chunk_documents: body.chunk_documents,
        // A fresh run has nothing to skip.
        skip_existing: !body.fresh,
    };
    let stats = ingest_dir(
        state.store.as_ref(),
        state.embedder.as_ref(),
        &state.docs_dir,
        &opts,
    )
    .await?;

    Ok(Json(ApiResponse::success(IngestResponse {
        processed: stats.processed,
        skipped: stats.skipped,
        total_files: stats.total,
        deleted,
    })))
}
