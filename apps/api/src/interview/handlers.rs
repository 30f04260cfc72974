use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Multipart, Path, State,
    },
    Form, Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::interview::models::{AnswerFeedback, InterviewStarted, SessionListItem, SessionSummary};
use crate::state::AppState;
use crate::transcription::transcribe_answer;

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub role: String,
    pub num_questions: Option<usize>,
    pub resume_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TextAnswerForm {
    pub session_id: String,
    pub answer_text: String,
}

#[derive(Debug, Deserialize)]
pub struct EndForm {
    pub session_id: String,
}

/// POST /api/interview/start
pub async fn handle_start(
    State(state): State<AppState>,
    payload: Result<Json<StartRequest>, JsonRejection>,
) -> Result<Json<InterviewStarted>, AppError> {
    let Json(req) = payload?;
    let num_questions = req.num_questions.unwrap_or(state.config.default_questions);
    let resume_text = req
        .resume_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let started = state
        .interview
        .start(&req.role, num_questions, resume_text)
        .await?;
    Ok(Json(started))
}

/// POST /api/interview/answer/text
pub async fn handle_text_answer(
    State(state): State<AppState>,
    payload: Result<Form<TextAnswerForm>, FormRejection>,
) -> Result<Json<AnswerFeedback>, AppError> {
    let Form(form) = payload?;
    let feedback = state
        .interview
        .process_answer(&form.session_id, &form.answer_text)
        .await?;
    Ok(Json(feedback))
}

/// POST /api/interview/answer/audio
/// Multipart fields: `session_id` and `audio`. The recording is transcribed and then
/// graded exactly like a text answer.
pub async fn handle_audio_answer(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnswerFeedback>, AppError> {
    let mut session_id: Option<String> = None;
    let mut audio: Option<(Vec<u8>, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("session_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid session_id field: {e}")))?;
                session_id = Some(value);
            }
            Some("audio") => {
                let filename = field.file_name().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid audio field: {e}")))?;
                audio = Some((bytes.to_vec(), filename));
            }
            _ => {}
        }
    }

    let session_id =
        session_id.ok_or_else(|| AppError::Validation("session_id is required".to_string()))?;
    let (bytes, filename) =
        audio.ok_or_else(|| AppError::Validation("audio file is required".to_string()))?;

    // Fail fast on unknown or finished sessions before paying for transcription.
    state.interview.pending_question(&session_id).await?;

    let transcript =
        transcribe_answer(state.transcriber.as_ref(), bytes, filename.as_deref()).await?;
    let feedback = state
        .interview
        .process_answer(&session_id, &transcript)
        .await?;
    Ok(Json(feedback))
}

/// POST /api/interview/end
pub async fn handle_end(
    State(state): State<AppState>,
    payload: Result<Form<EndForm>, FormRejection>,
) -> Result<Json<SessionSummary>, AppError> {
    let Form(form) = payload?;
    let summary = state.interview.end(&form.session_id).await?;
    Ok(Json(summary))
}

/// GET /api/interview/:session_id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSummary>, AppError> {
    let summary = state.interview.get(&session_id).await?;
    Ok(Json(summary))
}

/// GET /api/interview
pub async fn handle_list_sessions(State(state): State<AppState>) -> Json<Vec<SessionListItem>> {
    Json(state.interview.list_sessions().await)
}
