mod config;
mod errors;
mod interview;
mod llm_client;
mod resume;
mod routes;
mod state;
mod transcription;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::interview::orchestrator::{InterviewService, Providers};
use crate::interview::providers::{LlmAnswerGrader, LlmFeedbackSummarizer, LlmQuestionGenerator};
use crate::interview::sentiment::LexiconSentimentAnalyzer;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::transcription::WhisperTranscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // One client backs questions, grading, summaries and transcription
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
        config.whisper_model.clone(),
    )?;
    info!(
        "LLM client initialized (model: {}, transcription: {}, base: {})",
        llm.model(),
        llm.transcription_model(),
        config.openai_base_url
    );

    let providers = Providers {
        questions: Arc::new(LlmQuestionGenerator(llm.clone())),
        grader: Arc::new(LlmAnswerGrader(llm.clone())),
        sentiment: Arc::new(LexiconSentimentAnalyzer::new()),
        summarizer: Arc::new(LlmFeedbackSummarizer(llm.clone())),
    };
    let interview = Arc::new(InterviewService::new(providers, config.max_questions));
    info!(
        "Interview service ready (default {} questions, max {})",
        config.default_questions, config.max_questions
    );

    let cors = build_cors(&config)?;

    // Build app state
    let state = AppState {
        interview,
        transcriber: Arc::new(WhisperTranscriber(llm)),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Restricts cross-origin access to the configured frontend origins.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    info!("CORS allowed origins: {:?}", config.cors_allowed_origins);

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
