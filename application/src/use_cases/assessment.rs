//! Assessment controller.
//!
//! Drives one assessment attempt:
//!
//! ```text
//! load_questions()  ──► create session (placeholder on failure) ──► question 0
//!        │
//!        ▼ (empty list / HTTP error)
//!      Error
//!
//! select_answer() ──► ResponseMap + SaveQueue flush ──► re-render
//! next_question() past the end ──► completion summary
//! finish_assessment() ──► [confirm if < min_answers] ──► complete ──► redirect
//! ```
//!
//! Each operation takes `&mut self`; the controller is the sole owner of
//! the attempt's state.

use crate::config::{AssessmentParams, Endpoints};
use crate::ports::confirmation::{ConfirmationError, ConfirmationPort};
use crate::ports::renderer::{AssessmentRenderer, QuestionView};
use crate::ports::response_time::ResponseTimeSource;
use crate::ports::transcript::{NoTranscript, TranscriptEvent, TranscriptLogger};
use crate::ports::transport::{Transport, TransportError, decode};
use crate::use_cases::save_queue::{SaveQueue, SaveStatus};
use compass_domain::{
    AssessmentPhase, AssessmentResult, ChoiceId, DomainError, Navigation, Progress, Question,
    QuestionId, ResponseMap, Session, SessionCreated,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

const LOAD_FAILED: &str = "Failed to load questions. Please refresh the page.";
const COMPLETE_FAILED: &str = "Failed to complete assessment. Please try again.";

/// Errors returned by [`AssessmentController`] operations
#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("Failed to load questions: {0}")]
    LoadFailed(#[source] TransportError),

    #[error("Not available while the assessment is {0}")]
    NotReady(AssessmentPhase),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{message}")]
    CompletionFailed {
        message: String,
        #[source]
        source: TransportError,
    },

    #[error("Confirmation failed: {0}")]
    Confirmation(#[from] ConfirmationError),
}

/// Result of [`AssessmentController::finish_assessment`]
#[derive(Debug)]
pub enum FinishOutcome {
    /// The user declined to finish early; nothing was sent
    Declined,
    /// The server accepted the completion; `result` is set when the payload decoded
    Completed { result: Option<AssessmentResult> },
}

pub struct AssessmentController {
    transport: Arc<dyn Transport>,
    renderer: Arc<dyn AssessmentRenderer>,
    confirmation: Arc<dyn ConfirmationPort>,
    response_time: Arc<dyn ResponseTimeSource>,
    transcript: Arc<dyn TranscriptLogger>,
    endpoints: Endpoints,
    params: AssessmentParams,

    phase: AssessmentPhase,
    questions: Vec<Question>,
    current_index: usize,
    responses: ResponseMap,
    session: Option<Session>,
    saves: SaveQueue,
}

impl AssessmentController {
    pub fn new(
        transport: Arc<dyn Transport>,
        renderer: Arc<dyn AssessmentRenderer>,
        confirmation: Arc<dyn ConfirmationPort>,
        response_time: Arc<dyn ResponseTimeSource>,
    ) -> Self {
        Self {
            transport,
            renderer,
            confirmation,
            response_time,
            transcript: Arc::new(NoTranscript),
            endpoints: Endpoints::default(),
            params: AssessmentParams::default(),
            phase: AssessmentPhase::Loading,
            questions: Vec::new(),
            current_index: 0,
            responses: ResponseMap::new(),
            session: None,
            saves: SaveQueue::new(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_params(mut self, params: AssessmentParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    // ==================== Accessors ====================

    pub fn phase(&self) -> AssessmentPhase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Answers still waiting to reach the server
    pub fn pending_saves(&self) -> usize {
        self.saves.len()
    }

    pub fn progress(&self) -> Progress {
        Progress::new(
            self.responses.len(),
            self.questions.len(),
            self.current_index,
        )
    }

    pub fn navigation(&self) -> Navigation {
        Navigation::derive(&self.progress())
    }

    // ==================== Operations ====================

    /// Fetch the question list, open a session and show the first question.
    pub async fn load_questions(&mut self) -> Result<(), AssessmentError> {
        self.phase = AssessmentPhase::Loading;
        self.renderer.show_loading("Loading...");
        info!("Loading questions from {}", self.endpoints.questions);

        let questions = match self.fetch_questions().await {
            Ok(questions) if !questions.is_empty() => questions,
            Ok(_) => {
                error!("Question list is empty");
                return Err(self.fail_load(DomainError::NoQuestions.into()));
            }
            Err(e) => {
                error!("Error loading questions: {}", e);
                return Err(self.fail_load(AssessmentError::LoadFailed(e)));
            }
        };

        info!("Loaded {} questions", questions.len());
        self.questions = questions;

        self.initialize_session().await;

        self.renderer.hide_loading();
        self.phase = AssessmentPhase::InProgress;
        self.show_question(0)
    }

    async fn fetch_questions(&self) -> Result<Vec<Question>, TransportError> {
        let value = self.transport.get_json(&self.endpoints.questions).await?;
        decode(value)
    }

    fn fail_load(&mut self, error: AssessmentError) -> AssessmentError {
        self.phase = AssessmentPhase::Error;
        self.renderer.show_error(LOAD_FAILED);
        error
    }

    async fn initialize_session(&mut self) {
        let created = match self
            .transport
            .post_json(&self.endpoints.sessions, Some(&json!({})))
            .await
        {
            Ok(value) => decode::<SessionCreated>(value),
            Err(e) => Err(e),
        };

        let session = match created {
            Ok(created) => {
                info!("Session initialized with ID: {}", created.id);
                Session::created(created.id)
            }
            Err(e) => {
                warn!(
                    "Error initializing session ({}); continuing with placeholder '{}', answers will not persist",
                    e, self.params.placeholder_session
                );
                Session::placeholder(self.params.placeholder_session.clone())
            }
        };

        self.transcript.log(TranscriptEvent::new(
            "session_started",
            json!({
                "session": session.id().as_str(),
                "placeholder": session.is_placeholder(),
                "questions": self.questions.len(),
            }),
        ));
        self.session = Some(session);
    }

    /// Display the question at `index`.
    ///
    /// Out-of-range indices are rejected and leave the current index as is.
    pub fn show_question(&mut self, index: usize) -> Result<(), AssessmentError> {
        if !self.phase.allows_navigation() {
            return Err(AssessmentError::NotReady(self.phase));
        }
        if index >= self.questions.len() {
            error!("Invalid question index: {}", index);
            return Err(DomainError::QuestionIndexOutOfRange {
                index,
                len: self.questions.len(),
            }
            .into());
        }

        self.current_index = index;
        self.phase = AssessmentPhase::InProgress;
        debug!("Showing question {} (index {})", self.questions[index].id, index);
        self.render_current();
        Ok(())
    }

    fn render_current(&self) {
        let Some(question) = self.current_question() else {
            return;
        };
        self.renderer.show_question(&QuestionView {
            question,
            selected: self.responses.get(question.id),
            index: self.current_index,
            total: self.questions.len(),
        });
        let progress = self.progress();
        self.renderer.show_progress(&progress);
        self.renderer.show_navigation(&Navigation::derive(&progress));
    }

    /// Record `choice` for `question` and persist it.
    ///
    /// Only this answer is sent. It is kept locally even if the save fails;
    /// unsaved answers stay queued and are retried before completion.
    pub async fn select_answer(
        &mut self,
        question: QuestionId,
        choice: ChoiceId,
    ) -> Result<SaveStatus, AssessmentError> {
        if self.phase != AssessmentPhase::InProgress {
            return Err(AssessmentError::NotReady(self.phase));
        }
        let known = self
            .questions
            .iter()
            .find(|q| q.id == question)
            .ok_or(DomainError::UnknownQuestion(question))?;
        if known.choice(choice).is_none() {
            return Err(DomainError::UnknownChoice { question, choice }.into());
        }

        debug!("Selected answer for question {}: {}", question, choice);
        self.responses.record(question, choice);
        self.saves
            .enqueue(question, choice, self.response_time.next_response_time());

        let status = self.persist(Some(question)).await;

        self.render_current();
        Ok(status)
    }

    /// Select the choice at 1-based `position` of the current question
    pub async fn select_choice_at(&mut self, position: usize) -> Result<SaveStatus, AssessmentError> {
        let (question, choice) = {
            let current = self
                .current_question()
                .ok_or(AssessmentError::NotReady(self.phase))?;
            let choice = current
                .choice_at(position)
                .ok_or(DomainError::UnknownChoice {
                    question: current.id,
                    choice: ChoiceId(position as i64),
                })?;
            (current.id, choice.id)
        };
        self.select_answer(question, choice).await
    }

    /// Send the answer for `only`, or the whole backlog when `None`
    async fn persist(&mut self, only: Option<QuestionId>) -> SaveStatus {
        let Some(session) = self.session.as_ref() else {
            return SaveStatus::default();
        };
        let path = self.endpoints.submit_response_for(session.id());
        let transport = self.transport.as_ref();
        let status = match only {
            Some(question) => self.saves.save(question, transport, &path, &self.params).await,
            None => self.saves.flush(transport, &path, &self.params).await,
        };

        for question in &status.saved {
            if let Some(choice) = self.responses.get(*question) {
                self.transcript.log(TranscriptEvent::new(
                    "answer_saved",
                    json!({ "question_id": question, "answer_id": choice }),
                ));
            }
        }
        if !status.is_clean() {
            self.transcript.log(TranscriptEvent::new(
                "answers_unsaved",
                json!({ "question_ids": status.unsaved, "error": status.last_error }),
            ));
        }

        self.renderer.show_save_status(&status);
        status
    }

    /// Go back one question; returns false when already at the first
    pub fn previous_question(&mut self) -> Result<bool, AssessmentError> {
        if !self.phase.allows_navigation() {
            return Err(AssessmentError::NotReady(self.phase));
        }
        if self.current_index == 0 {
            return Ok(false);
        }
        self.show_question(self.current_index - 1)?;
        Ok(true)
    }

    /// Advance one question, or show the completion summary after the last
    pub fn next_question(&mut self) -> Result<(), AssessmentError> {
        if !self.phase.allows_navigation() {
            return Err(AssessmentError::NotReady(self.phase));
        }
        if self.current_index + 1 < self.questions.len() {
            return self.show_question(self.current_index + 1);
        }
        self.phase = AssessmentPhase::CompletionReview;
        self.renderer.show_completion_summary(&self.progress());
        Ok(())
    }

    /// Leave the completion summary and review from the first question
    pub fn restart_review(&mut self) -> Result<(), AssessmentError> {
        self.show_question(0)
    }

    /// Submit the completion request and redirect to the results page.
    pub async fn finish_assessment(&mut self) -> Result<FinishOutcome, AssessmentError> {
        if !self.phase.allows_navigation() {
            return Err(AssessmentError::NotReady(self.phase));
        }

        let answered = self.responses.len();
        let total = self.questions.len();
        if answered < self.params.min_answers {
            let prompt = format!(
                "You have answered {} out of {} questions. Are you sure you want to finish the assessment?",
                answered, total
            );
            let proceed = match self.confirmation.confirm(&prompt).await {
                Ok(proceed) => proceed,
                Err(ConfirmationError::Cancelled) => false,
                Err(e) => return Err(e.into()),
            };
            if !proceed {
                info!("Finish declined with {}/{} answered", answered, total);
                return Ok(FinishOutcome::Declined);
            }
        }

        // allows_navigation() above guarantees the session was initialized
        let Some(session_id) = self.session.as_ref().map(|s| s.id().clone()) else {
            return Err(AssessmentError::NotReady(self.phase));
        };

        self.phase = AssessmentPhase::Submitting;
        self.renderer.show_loading("Generating your results...");

        if !self.saves.is_empty() {
            info!("Retrying {} unsaved answers before completion", self.saves.len());
            self.persist(None).await;
        }

        let path = self.endpoints.complete_assessment_for(&session_id);
        match self.transport.post_json(&path, None).await {
            Ok(value) => {
                info!("Assessment completed successfully, redirecting...");
                let result = match decode::<AssessmentResult>(value) {
                    Ok(result) => Some(result),
                    Err(e) => {
                        warn!("Completion payload not understood: {}", e);
                        None
                    }
                };
                self.phase = AssessmentPhase::Done;
                self.transcript.log(TranscriptEvent::new(
                    "assessment_completed",
                    json!({ "session": session_id.as_str(), "answered": answered, "total": total }),
                ));
                self.renderer
                    .redirect(&self.endpoints.results_page, result.as_ref());
                Ok(FinishOutcome::Completed { result })
            }
            Err(e) => {
                error!("Error completing assessment: {}", e);
                let message = e.server_message().unwrap_or(COMPLETE_FAILED).to_string();
                self.phase = AssessmentPhase::Error;
                self.transcript.log(TranscriptEvent::new(
                    "assessment_failed",
                    json!({ "session": session_id.as_str(), "error": message }),
                ));
                self.renderer.show_error(&message);
                Err(AssessmentError::CompletionFailed { message, source: e })
            }
        }
    }
}
