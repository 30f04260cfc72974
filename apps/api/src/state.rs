use std::sync::Arc;

use crate::config::Config;
use crate::interview::orchestrator::InterviewService;
use crate::transcription::Transcriber;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub interview: Arc<InterviewService>,
    /// Speech-to-text for audio answers. Default: WhisperTranscriber.
    pub transcriber: Arc<dyn Transcriber>,
    pub config: Config,
}
