//! Evaluation signal providers: pluggable, trait-based scorers the orchestrator calls.
//!
//! Default backends: LLM-backed question generation, grading and narrative summary,
//! plus the local `LexiconSentimentAnalyzer`. None of them know about sessions.
//!
//! `InterviewService` holds each provider as an `Arc<dyn …>`, wired at startup.

use async_trait::async_trait;
use tracing::warn;

use crate::errors::AppError;
use crate::interview::models::{GradingResult, QaRecord, SentimentResult};
use crate::interview::prompts::{
    GRADING_PERSONA, GRADING_PROMPT_TEMPLATE, QUESTION_PERSONA, QUESTION_PROMPT_TEMPLATE,
    RESUME_CONTEXT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM,
};
use crate::llm_client::prompts::json_system;
use crate::llm_client::{CallOptions, LlmClient};

/// Resume text beyond this many characters is not sent to the model.
const RESUME_CONTEXT_CHARS: usize = 3000;

const QUESTION_OPTIONS: CallOptions = CallOptions {
    temperature: 0.7,
    max_tokens: 2000,
};
const GRADING_OPTIONS: CallOptions = CallOptions {
    temperature: 0.5,
    max_tokens: 1000,
};
const SUMMARY_OPTIONS: CallOptions = CallOptions {
    temperature: 0.6,
    max_tokens: 500,
};

// ────────────────────────────────────────────────────────────────────────────
// Trait definitions
// ────────────────────────────────────────────────────────────────────────────

/// Produces the ordered question list for a new session.
/// May return fewer than `count` questions; never more.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(
        &self,
        role: &str,
        count: usize,
        resume_text: Option<&str>,
    ) -> Result<Vec<String>, AppError>;
}

/// Scores one answer. Not deterministic across calls.
#[async_trait]
pub trait AnswerGrader: Send + Sync {
    async fn grade(
        &self,
        question: &str,
        answer: &str,
        role: &str,
    ) -> Result<GradingResult, AppError>;
}

/// Local, pure polarity/subjectivity scoring.
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> SentimentResult;
}

/// Writes the overall narrative for a set of answered questions.
#[async_trait]
pub trait FeedbackSummarizer: Send + Sync {
    async fn summarize(&self, role: &str, records: &[QaRecord]) -> Result<String, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LLM-backed implementations
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmQuestionGenerator(pub LlmClient);

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn generate(
        &self,
        role: &str,
        count: usize,
        resume_text: Option<&str>,
    ) -> Result<Vec<String>, AppError> {
        let prompt = build_question_prompt(role, count, resume_text);
        let raw: Vec<String> = self
            .0
            .call_json(&prompt, &json_system(QUESTION_PERSONA), QUESTION_OPTIONS)
            .await
            .map_err(|e| AppError::Upstream(format!("Question generation failed: {e}")))?;

        let questions = normalize_questions(raw, count);
        if questions.is_empty() {
            return Err(AppError::Upstream(
                "Question generation returned no questions".to_string(),
            ));
        }
        if questions.len() < count {
            warn!(
                "Question generator returned {} of {} requested questions",
                questions.len(),
                count
            );
        }
        Ok(questions)
    }
}

pub struct LlmAnswerGrader(pub LlmClient);

#[async_trait]
impl AnswerGrader for LlmAnswerGrader {
    async fn grade(
        &self,
        question: &str,
        answer: &str,
        role: &str,
    ) -> Result<GradingResult, AppError> {
        let prompt = GRADING_PROMPT_TEMPLATE
            .replace("{role}", role)
            .replace("{question}", question)
            .replace("{answer}", answer);

        let grading: GradingResult = self
            .0
            .call_json(&prompt, &json_system(GRADING_PERSONA), GRADING_OPTIONS)
            .await
            .map_err(|e| AppError::Upstream(format!("Answer evaluation failed: {e}")))?;

        sanitize_grading(grading)
    }
}

pub struct LlmFeedbackSummarizer(pub LlmClient);

#[async_trait]
impl FeedbackSummarizer for LlmFeedbackSummarizer {
    async fn summarize(&self, role: &str, records: &[QaRecord]) -> Result<String, AppError> {
        let prompt = SUMMARY_PROMPT_TEMPLATE
            .replace("{role}", role)
            .replace("{qa_summary}", &format_qa_summary(records));

        self.0
            .call_text(&prompt, SUMMARY_SYSTEM, SUMMARY_OPTIONS)
            .await
            .map_err(|e| AppError::Upstream(format!("Overall feedback generation failed: {e}")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt building and output checks
// ────────────────────────────────────────────────────────────────────────────

fn build_question_prompt(role: &str, count: usize, resume_text: Option<&str>) -> String {
    let resume_context = resume_text
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            let truncated: String = t.chars().take(RESUME_CONTEXT_CHARS).collect();
            RESUME_CONTEXT_TEMPLATE.replace("{resume_text}", &truncated)
        })
        .unwrap_or_default();

    QUESTION_PROMPT_TEMPLATE
        .replace("{num_questions}", &count.to_string())
        .replace("{role}", role)
        .replace("{resume_context}", &resume_context)
}

/// Trims entries, drops blanks and keeps at most `count`.
fn normalize_questions(raw: Vec<String>, count: usize) -> Vec<String> {
    raw.into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .take(count)
        .collect()
}

/// Rejects a non-finite score; clamps a finite one into 0–10.
fn sanitize_grading(mut grading: GradingResult) -> Result<GradingResult, AppError> {
    if !grading.score.is_finite() {
        return Err(AppError::Upstream(format!(
            "Answer evaluation returned an invalid score: {}",
            grading.score
        )));
    }
    if !(0.0..=10.0).contains(&grading.score) {
        warn!("Clamping out-of-range answer score {}", grading.score);
        grading.score = grading.score.clamp(0.0, 10.0);
    }
    Ok(grading)
}

fn format_qa_summary(records: &[QaRecord]) -> String {
    records
        .iter()
        .map(|r| format!("Q: {}\nA: {}\nScore: {}/10", r.question, r.answer, r.score))
        .collect::<Vec<_>>()
        .join("\n")
}
