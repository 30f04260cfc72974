use axum::{extract::Multipart, Json};
use tracing::info;

use crate::errors::AppError;
use crate::resume::parser::{parse_resume, ResumeFormat, ResumeParseResponse};

/// POST /api/resume/upload
/// Multipart field `file` (PDF or DOCX). Returns a preview of the extracted text; the
/// client sends the full text back as `resume_text` when starting an interview.
pub async fn handle_upload(
    mut multipart: Multipart,
) -> Result<Json<ResumeParseResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(String::from)
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
        let format = ResumeFormat::from_filename(&filename)?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid file field: {e}")))?;

        let text = tokio::task::spawn_blocking(move || parse_resume(&bytes, format))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("resume parser panicked: {e}")))??;

        info!(
            "Parsed resume '{}' ({:?}): {} chars",
            filename,
            format,
            text.chars().count()
        );
        return Ok(Json(ResumeParseResponse::new(filename, &text)));
    }

    Err(AppError::Validation("No file provided".to_string()))
}
