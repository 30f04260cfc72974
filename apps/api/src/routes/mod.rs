pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/api/health", get(health::health_handler))
        // Interview API
        .route("/api/interview", get(handlers::handle_list_sessions))
        .route("/api/interview/", get(handlers::handle_list_sessions))
        .route("/api/interview/start", post(handlers::handle_start))
        .route(
            "/api/interview/answer/text",
            post(handlers::handle_text_answer),
        )
        .route(
            "/api/interview/answer/audio",
            post(handlers::handle_audio_answer),
        )
        .route("/api/interview/end", post(handlers::handle_end))
        .route(
            "/api/interview/:session_id",
            get(handlers::handle_get_session),
        )
        // Resume API
        .route("/api/resume/upload", post(resume::handle_upload))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
