//! Deterministic provider fakes for orchestrator and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::QUESTION_LIMIT;
use crate::errors::AppError;
use crate::interview::models::{GradingResult, QaRecord};
use crate::interview::orchestrator::{InterviewService, Providers};
use crate::interview::providers::{AnswerGrader, FeedbackSummarizer, QuestionGenerator};
use crate::interview::sentiment::LexiconSentimentAnalyzer;
use crate::transcription::Transcriber;

type GenerateCall = (String, usize, Option<String>);
type GradeCall = (String, String, String);

pub struct FixedQuestionGenerator {
    questions: Vec<String>,
    calls: Arc<Mutex<Vec<GenerateCall>>>,
}

impl FixedQuestionGenerator {
    pub fn new(questions: &[&str]) -> Self {
        Self {
            questions: questions.iter().map(|q| q.to_string()).collect(),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<GenerateCall>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl QuestionGenerator for FixedQuestionGenerator {
    async fn generate(
        &self,
        role: &str,
        count: usize,
        resume_text: Option<&str>,
    ) -> Result<Vec<String>, AppError> {
        self.calls.lock().unwrap().push((
            role.to_string(),
            count,
            resume_text.map(String::from),
        ));
        Ok(self.questions.clone())
    }
}

pub struct FailingQuestionGenerator;

#[async_trait]
impl QuestionGenerator for FailingQuestionGenerator {
    async fn generate(
        &self,
        _role: &str,
        _count: usize,
        _resume_text: Option<&str>,
    ) -> Result<Vec<String>, AppError> {
        Err(AppError::Upstream(
            "Question generation failed: malformed output".to_string(),
        ))
    }
}

/// Returns scores from a script, repeating the last one when it runs out.
pub struct ScriptedGrader {
    scores: Vec<f64>,
    next: AtomicUsize,
    fail: bool,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<GradeCall>>>,
}

impl ScriptedGrader {
    pub fn sequence(scores: &[f64]) -> Self {
        Self {
            scores: scores.to_vec(),
            next: AtomicUsize::new(0),
            fail: false,
            delay: None,
            calls: Arc::default(),
        }
    }

    pub fn constant(score: f64) -> Self {
        Self::sequence(&[score])
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::constant(0.0)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<GradeCall>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl AnswerGrader for ScriptedGrader {
    async fn grade(
        &self,
        question: &str,
        answer: &str,
        role: &str,
    ) -> Result<GradingResult, AppError> {
        self.calls.lock().unwrap().push((
            question.to_string(),
            answer.to_string(),
            role.to_string(),
        ));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(AppError::Upstream("Answer evaluation failed".to_string()));
        }

        let i = self.next.fetch_add(1, Ordering::SeqCst);
        let score = self.scores[i.min(self.scores.len() - 1)];
        Ok(GradingResult {
            score,
            feedback: format!("Scored {score}"),
            strengths: vec!["Structured answer".to_string()],
            improvements: vec!["Add metrics".to_string()],
        })
    }
}

pub struct EchoSummarizer;

#[async_trait]
impl FeedbackSummarizer for EchoSummarizer {
    async fn summarize(&self, role: &str, records: &[QaRecord]) -> Result<String, AppError> {
        Ok(format!("Summary of {} answers for {role}", records.len()))
    }
}

/// Echoes the record count after a pause, leaving a window for concurrent writes.
pub struct SlowSummarizer(pub Duration);

#[async_trait]
impl FeedbackSummarizer for SlowSummarizer {
    async fn summarize(&self, role: &str, records: &[QaRecord]) -> Result<String, AppError> {
        tokio::time::sleep(self.0).await;
        EchoSummarizer.summarize(role, records).await
    }
}

pub struct FailingSummarizer;

#[async_trait]
impl FeedbackSummarizer for FailingSummarizer {
    async fn summarize(&self, _role: &str, _records: &[QaRecord]) -> Result<String, AppError> {
        Err(AppError::Upstream(
            "Overall feedback generation failed".to_string(),
        ))
    }
}

/// Returns a fixed transcript regardless of the audio.
pub struct FixedTranscriber(pub String);

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, _audio: Vec<u8>, _filename: &str) -> Result<String, AppError> {
        Ok(self.0.clone())
    }
}

pub fn service_with(
    generator: impl QuestionGenerator + 'static,
    grader: ScriptedGrader,
) -> InterviewService {
    InterviewService::new(
        Providers {
            questions: Arc::new(generator),
            grader: Arc::new(grader),
            sentiment: Arc::new(LexiconSentimentAnalyzer::new()),
            summarizer: Arc::new(EchoSummarizer),
        },
        QUESTION_LIMIT,
    )
}
