use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "agro-digest",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// On-demand digest preview: runs a full generation cycle.
pub async fn digest(State(state): State<Arc<AppState>>) -> String {
    state.service.generate_message().await
}
