//! Interview orchestration: the session state machine.
//!
//! Flow: start → process_answer × N → end, with get / list as read-only views.
//!
//! start:          validate → generate questions → store session
//! process_answer: take the session's turn → grade ‖ sentiment → append + advance
//! end:            take the turn → set ended_at → narrative summary → aggregate
//!
//! Provider failures surface immediately as `AppError::Upstream`; nothing retries.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::interview::models::{
    AnswerFeedback, InterviewStarted, QaRecord, Session, SessionListItem, SessionSummary,
    IN_PROGRESS_FEEDBACK,
};
use crate::interview::providers::{
    AnswerGrader, FeedbackSummarizer, QuestionGenerator, SentimentAnalyzer,
};
use crate::interview::store::{SessionSlot, SessionStore};

/// The evaluation providers the orchestrator composes. Wired once at startup.
#[derive(Clone)]
pub struct Providers {
    pub questions: Arc<dyn QuestionGenerator>,
    pub grader: Arc<dyn AnswerGrader>,
    pub sentiment: Arc<dyn SentimentAnalyzer>,
    pub summarizer: Arc<dyn FeedbackSummarizer>,
}

pub struct InterviewService {
    store: SessionStore,
    providers: Providers,
    max_questions: usize,
}

impl InterviewService {
    pub fn new(providers: Providers, max_questions: usize) -> Self {
        Self {
            store: SessionStore::new(),
            providers,
            max_questions,
        }
    }

    /// Starts a session. Nothing is stored unless question generation succeeds.
    pub async fn start(
        &self,
        role: &str,
        num_questions: usize,
        resume_text: Option<&str>,
    ) -> Result<InterviewStarted, AppError> {
        let role = role.trim();
        if role.is_empty() {
            return Err(AppError::Validation("role cannot be empty".to_string()));
        }
        if !(1..=self.max_questions).contains(&num_questions) {
            return Err(AppError::Validation(format!(
                "num_questions must be between 1 and {}",
                self.max_questions
            )));
        }

        let mut questions = self
            .providers
            .questions
            .generate(role, num_questions, resume_text)
            .await?;
        questions.truncate(num_questions);

        let session = Session::new(role.to_string(), questions)?;
        let started = InterviewStarted {
            session_id: session.id().to_string(),
            role: session.role().to_string(),
            num_questions: session.total_questions(),
            first_question: session.questions()[0].clone(),
            question_number: 1,
        };

        self.store.insert(session).await;
        info!(
            "Started interview {} for '{}' with {} questions ({} sessions in memory)",
            started.session_id,
            started.role,
            started.num_questions,
            self.store.len().await
        );

        Ok(started)
    }

    /// Returns the question currently awaiting an answer.
    pub async fn pending_question(&self, session_id: &str) -> Result<String, AppError> {
        let slot = self.slot(session_id).await?;
        slot.read(|s| s.pending_question().map(String::from))
            .await
            .ok_or_else(exhausted)
    }

    /// Grades `answer_text` against the pending question, records it and advances.
    pub async fn process_answer(
        &self,
        session_id: &str,
        answer_text: &str,
    ) -> Result<AnswerFeedback, AppError> {
        if answer_text.trim().is_empty() {
            return Err(AppError::Validation("answer_text cannot be empty".to_string()));
        }

        let slot = self.slot(session_id).await?;
        let _turn = slot.begin_turn().await;

        let (question, role) = slot
            .read(|s| {
                s.pending_question()
                    .map(|q| (q.to_string(), s.role().to_string()))
            })
            .await
            .ok_or_else(exhausted)?;

        let (grading, sentiment) = tokio::join!(
            self.providers.grader.grade(&question, answer_text, &role),
            async { self.providers.sentiment.analyze(answer_text) },
        );
        let grading = grading?;

        let record = QaRecord::new(question, answer_text.to_string(), grading, sentiment);
        let progress = slot.write(|s| s.record_answer(record.clone())).await?;

        info!(
            "Interview {}: recorded answer (score {:.1}, {:?}), complete={}",
            session_id, record.score, record.sentiment, progress.is_complete
        );

        Ok(AnswerFeedback::new(record, progress))
    }

    /// Closes the session and produces the full summary with a fresh narrative.
    ///
    /// Not idempotent: every call moves `ended_at` and asks the summarizer again.
    pub async fn end(&self, session_id: &str) -> Result<SessionSummary, AppError> {
        let slot = self.slot(session_id).await?;

        // Held through the summarizer call so no answer lands between the snapshot
        // and the narrative written over it.
        let _turn = slot.begin_turn().await;
        let snapshot = slot
            .write(|s| {
                if s.records().is_empty() {
                    return Err(AppError::InvalidState(
                        "No questions answered yet".to_string(),
                    ));
                }
                s.close(Utc::now());
                Ok(s.clone())
            })
            .await?;

        let overall_feedback = self
            .providers
            .summarizer
            .summarize(snapshot.role(), snapshot.records())
            .await?;

        let summary = SessionSummary::build(&snapshot, overall_feedback);
        info!(
            "Ended interview {}: {}/{} answered, average score {}",
            summary.session_id,
            summary.questions_answered,
            summary.num_questions,
            summary.average_score
        );

        Ok(summary)
    }

    /// Read-only summary. Never calls the summarizer.
    pub async fn get(&self, session_id: &str) -> Result<SessionSummary, AppError> {
        let slot = self.slot(session_id).await?;
        Ok(slot
            .read(|s| {
                let feedback = if s.ended_at().is_some() {
                    String::new()
                } else {
                    IN_PROGRESS_FEEDBACK.to_string()
                };
                SessionSummary::build(s, feedback)
            })
            .await)
    }

    /// Every session, newest first.
    pub async fn list_sessions(&self) -> Vec<SessionListItem> {
        let mut items: Vec<SessionListItem> = self
            .store
            .snapshot()
            .await
            .iter()
            .map(SessionListItem::from)
            .collect();
        items.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        items
    }

    async fn slot(&self, session_id: &str) -> Result<Arc<SessionSlot>, AppError> {
        self.store
            .get(session_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
    }
}

fn exhausted() -> AppError {
    AppError::InvalidState("All questions already answered".to_string())
}
