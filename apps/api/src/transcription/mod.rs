//! Speech-to-text for spoken answers. The interview core only ever sees the transcript.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Used when an upload arrives without a filename; the endpoint sniffs format from it.
pub const DEFAULT_AUDIO_FILENAME: &str = "audio.webm";

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, AppError>;
}

/// Whisper-compatible transcription through the shared `LlmClient`.
pub struct WhisperTranscriber(pub LlmClient);

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, AppError> {
        self.0
            .transcribe(audio, filename)
            .await
            .map_err(|e| AppError::Upstream(format!("Transcription failed: {e}")))
    }
}

/// Transcribes an answer recording, rejecting empty input and empty transcripts.
pub async fn transcribe_answer(
    transcriber: &dyn Transcriber,
    audio: Vec<u8>,
    filename: Option<&str>,
) -> Result<String, AppError> {
    if audio.is_empty() {
        return Err(AppError::Validation("audio file is empty".to_string()));
    }

    let filename = filename
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_AUDIO_FILENAME);
    let size = audio.len();

    let transcript = transcriber.transcribe(audio, filename).await?;
    let transcript = transcript.trim();
    if transcript.is_empty() {
        return Err(AppError::Upstream(
            "Could not transcribe audio. Please try again.".to_string(),
        ));
    }

    info!(
        "Transcribed {} bytes of '{}' into {} chars",
        size,
        filename,
        transcript.len()
    );
    Ok(transcript.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records the filename it was called with.
    struct RecordingTranscriber {
        transcript: String,
        filenames: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transcriber for RecordingTranscriber {
        async fn transcribe(&self, _audio: Vec<u8>, filename: &str) -> Result<String, AppError> {
            self.filenames.lock().unwrap().push(filename.to_string());
            Ok(self.transcript.clone())
        }
    }

    fn transcriber(transcript: &str) -> RecordingTranscriber {
        RecordingTranscriber {
            transcript: transcript.to_string(),
            filenames: Mutex::new(vec![]),
        }
    }

    #[tokio::test]
    async fn test_transcript_is_trimmed() {
        let t = transcriber("  I would use a queue.\n");
        let text = transcribe_answer(&t, vec![1, 2, 3], Some("answer.mp3"))
            .await
            .unwrap();
        assert_eq!(text, "I would use a queue.");
        assert_eq!(t.filenames.lock().unwrap()[0], "answer.mp3");
    }

    #[tokio::test]
    async fn test_missing_filename_uses_default() {
        let t = transcriber("hello");
        transcribe_answer(&t, vec![1], None).await.unwrap();
        transcribe_answer(&t, vec![1], Some("  ")).await.unwrap();
        let names = t.filenames.lock().unwrap();
        assert!(names.iter().all(|n| n == DEFAULT_AUDIO_FILENAME));
    }

    #[tokio::test]
    async fn test_empty_transcript_is_upstream_failure() {
        let t = transcriber("   ");
        let err = transcribe_answer(&t, vec![1], None).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_empty_audio_is_rejected_before_transcribing() {
        let t = transcriber("hello");
        let err = transcribe_answer(&t, vec![], None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(t.filenames.lock().unwrap().is_empty());
    }
}
