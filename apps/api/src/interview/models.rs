//! Interview data model: sessions, per-stage evaluation results and derived summaries.
//!
//! A `Session` owns its question list and append-only answer records. The answer
//! cursor is not stored separately: it is `records.len()`, so the record count and
//! the cursor can never disagree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Placeholder narrative returned by read-only lookups of a session still in progress.
pub const IN_PROGRESS_FEEDBACK: &str = "Interview in progress.";

const SCORE_PRECISION: i32 = 1;
const SIGNAL_PRECISION: i32 = 3;

// ────────────────────────────────────────────────────────────────────────────
// Stage results
// ────────────────────────────────────────────────────────────────────────────

/// Output of the answer grader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingResult {
    /// 0.0 – 10.0
    pub score: f64,
    pub feedback: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// Sentiment category derived from polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Strict thresholds: exactly ±0.1 is still `Neutral`.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.1 {
            Sentiment::Positive
        } else if polarity < -0.1 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Output of the sentiment analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    pub label: Sentiment,
    /// -1.0 – 1.0
    pub polarity: f64,
    /// 0.0 – 1.0, used as the answer confidence signal
    pub subjectivity: f64,
}

/// One answered question. Immutable once appended to a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaRecord {
    pub question: String,
    pub answer: String,
    pub score: f64,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub confidence_score: f64,
}

impl QaRecord {
    pub fn new(
        question: String,
        answer: String,
        grading: GradingResult,
        sentiment: SentimentResult,
    ) -> Self {
        Self {
            question,
            answer,
            score: grading.score,
            feedback: grading.feedback,
            strengths: grading.strengths,
            improvements: grading.improvements,
            sentiment: sentiment.label,
            sentiment_score: sentiment.polarity,
            confidence_score: sentiment.subjectivity,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    role: String,
    questions: Vec<String>,
    records: Vec<QaRecord>,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

/// Where a session stands right after an answer was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub next_question: Option<String>,
    /// 1-based; stays on the last question once the session is complete.
    pub question_number: usize,
    pub total_questions: usize,
    pub is_complete: bool,
}

impl Session {
    /// Creates a fresh session. The question list is fixed from here on and must
    /// not be empty.
    pub fn new(role: String, questions: Vec<String>) -> Result<Self, AppError> {
        if questions.is_empty() {
            return Err(AppError::Upstream(
                "Question generation returned no questions".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            role,
            questions,
            records: Vec::new(),
            started_at: Utc::now(),
            ended_at: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn records(&self) -> &[QaRecord] {
        &self.records
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn current_index(&self) -> usize {
        self.records.len()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_complete(&self) -> bool {
        self.current_index() >= self.total_questions()
    }

    /// The question awaiting an answer, if any remain.
    pub fn pending_question(&self) -> Option<&str> {
        self.questions.get(self.current_index()).map(String::as_str)
    }

    /// Appends `record` and advances the cursor in one step.
    ///
    /// The record must answer the currently pending question; anything else means
    /// another submission already took this slot.
    pub fn record_answer(&mut self, record: QaRecord) -> Result<Progress, AppError> {
        match self.pending_question() {
            None => {
                return Err(AppError::InvalidState(
                    "All questions already answered".to_string(),
                ))
            }
            Some(pending) if pending != record.question => {
                return Err(AppError::InvalidState(
                    "Question was already answered".to_string(),
                ))
            }
            Some(_) => {}
        }

        self.records.push(record);

        let index = self.current_index();
        let is_complete = self.is_complete();
        Ok(Progress {
            next_question: self.pending_question().map(String::from),
            question_number: if is_complete { index } else { index + 1 },
            total_questions: self.total_questions(),
            is_complete,
        })
    }

    /// Marks the session as ended. Calling it again moves the end time forward.
    pub fn close(&mut self, at: DateTime<Utc>) {
        self.ended_at = Some(at);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Boundary outcomes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct InterviewStarted {
    pub session_id: String,
    pub role: String,
    pub num_questions: usize,
    pub first_question: String,
    pub question_number: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerFeedback {
    pub score: f64,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub confidence_score: f64,
    pub next_question: Option<String>,
    pub question_number: usize,
    pub total_questions: usize,
    pub is_complete: bool,
}

impl AnswerFeedback {
    pub fn new(record: QaRecord, progress: Progress) -> Self {
        Self {
            score: record.score,
            feedback: record.feedback,
            strengths: record.strengths,
            improvements: record.improvements,
            sentiment: record.sentiment,
            sentiment_score: record.sentiment_score,
            confidence_score: record.confidence_score,
            next_question: progress.next_question,
            question_number: progress.question_number,
            total_questions: progress.total_questions,
            is_complete: progress.is_complete,
        }
    }
}

/// Full session report. Derived on every request, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub role: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub num_questions: usize,
    pub questions_answered: usize,
    pub average_score: f64,
    pub average_sentiment: f64,
    pub average_confidence: f64,
    pub overall_feedback: String,
    pub qa_pairs: Vec<QaRecord>,
}

impl SessionSummary {
    pub fn build(session: &Session, overall_feedback: String) -> Self {
        let records = session.records();
        Self {
            session_id: session.id().to_string(),
            role: session.role().to_string(),
            started_at: session.started_at(),
            ended_at: session.ended_at(),
            num_questions: session.total_questions(),
            questions_answered: records.len(),
            average_score: average_score(records),
            average_sentiment: round_to(
                mean(records.iter().map(|r| r.sentiment_score)),
                SIGNAL_PRECISION,
            ),
            average_confidence: round_to(
                mean(records.iter().map(|r| r.confidence_score)),
                SIGNAL_PRECISION,
            ),
            overall_feedback,
            qa_pairs: records.to_vec(),
        }
    }
}

/// Brief per-session row for the history list.
#[derive(Debug, Clone, Serialize)]
pub struct SessionListItem {
    pub session_id: String,
    pub role: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub questions_answered: usize,
    pub num_questions: usize,
    pub average_score: f64,
}

impl From<&Session> for SessionListItem {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id().to_string(),
            role: session.role().to_string(),
            started_at: session.started_at(),
            ended_at: session.ended_at(),
            questions_answered: session.records().len(),
            num_questions: session.total_questions(),
            average_score: average_score(session.records()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation helpers
// ────────────────────────────────────────────────────────────────────────────

fn average_score(records: &[QaRecord]) -> f64 {
    round_to(mean(records.iter().map(|r| r.score)), SCORE_PRECISION)
}

/// Arithmetic mean; 0.0 for an empty sequence.
pub fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
