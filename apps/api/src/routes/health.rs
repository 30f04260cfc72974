use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "online",
        "service": "interview-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/health
/// Reports which provider backs each evaluation service.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "services": {
            "llm": state.config.openai_model,
            "stt": state.config.whisper_model,
            "sentiment": "lexicon",
        }
    }))
}
