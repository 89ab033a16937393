//! Health endpoints: cheap liveness plus an upstream LLM probe.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use llm_service::health_service::{HealthService, HealthStatus};
use serde_json::{Value, json};

use crate::core::app_state::AppState;
use crate::error_handler::AppResult;

/// Handler: GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// Handler: GET /health/llm
///
/// Probes the configured provider; never fails the request, the probe
/// outcome is in the body.
pub async fn health_llm(State(state): State<Arc<AppState>>) -> AppResult<Json<HealthStatus>> {
    let svc = HealthService::new(Some(10))?;
    Ok(Json(svc.check(&state.llm_config).await))
}
