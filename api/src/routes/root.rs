//! GET / — service banner.

use axum::Json;
use serde_json::{Value, json};

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "FAQ chat backend",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
