//! Ordered queue for answer persistence.
//!
//! Every selected answer is queued and sent in selection order. Re-answering
//! a question that is still queued replaces the queued choice in place, so
//! only the latest answer for a question is ever sent. Transient failures are
//! retried with exponential backoff; answers that still fail stay queued and
//! are reported as unsaved until a later flush succeeds.
//!
//! [`SaveQueue::save`] sends a single answer, so the cost of selecting an
//! answer does not grow with the backlog. [`SaveQueue::flush`] sends all of
//! them and is meant for the pre-completion pass.

use crate::config::AssessmentParams;
use crate::ports::transport::{Transport, TransportError};
use compass_domain::{ChoiceId, QuestionId};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// One answer waiting to reach the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub question: QuestionId,
    pub choice: ChoiceId,
    pub response_time: u32,
}

#[derive(Serialize)]
struct SubmitResponseBody {
    question_id: QuestionId,
    answer_id: ChoiceId,
    response_time: u32,
}

impl From<&PendingSave> for SubmitResponseBody {
    fn from(save: &PendingSave) -> Self {
        Self {
            question_id: save.question,
            answer_id: save.choice,
            response_time: save.response_time,
        }
    }
}

/// Outcome of one flush
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveStatus {
    /// Questions whose answers reached the server during this flush
    pub saved: Vec<QuestionId>,
    /// Questions whose answers are still queued, in send order
    pub unsaved: Vec<QuestionId>,
    /// Last error seen, for display
    pub last_error: Option<String>,
}

impl SaveStatus {
    pub fn is_clean(&self) -> bool {
        self.unsaved.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SaveQueue {
    pending: VecDeque<PendingSave>,
}

impl SaveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer; a queued answer for the same question is replaced in place
    pub fn enqueue(&mut self, question: QuestionId, choice: ChoiceId, response_time: u32) {
        if let Some(existing) = self.pending.iter_mut().find(|p| p.question == question) {
            existing.choice = choice;
            existing.response_time = response_time;
            return;
        }
        self.pending.push_back(PendingSave {
            question,
            choice,
            response_time,
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingSave> {
        self.pending.iter()
    }

    /// Send only the queued answer for `question`; older leftovers stay queued.
    ///
    /// `unsaved` in the returned status lists everything still queued
    /// afterwards, not just `question`.
    pub async fn save(
        &mut self,
        question: QuestionId,
        transport: &dyn Transport,
        path: &str,
        params: &AssessmentParams,
    ) -> SaveStatus {
        let mut status = SaveStatus::default();
        let Some(position) = self.pending.iter().position(|p| p.question == question) else {
            status.unsaved = self.pending.iter().map(|p| p.question).collect();
            return status;
        };

        let save = self.pending[position].clone();
        match Self::send_with_retry(transport, path, &save, params).await {
            Ok(()) => {
                debug!(
                    "Response saved for question {} (choice {})",
                    save.question, save.choice
                );
                self.pending.remove(position);
                status.saved.push(save.question);
            }
            Err(e) => {
                warn!("Error saving response for question {}: {}", save.question, e);
                status.last_error = Some(e.to_string());
            }
        }

        status.unsaved = self.pending.iter().map(|p| p.question).collect();
        status
    }

    /// Send every queued answer to `path`, oldest first.
    pub async fn flush(
        &mut self,
        transport: &dyn Transport,
        path: &str,
        params: &AssessmentParams,
    ) -> SaveStatus {
        let mut status = SaveStatus::default();
        let mut still_pending = VecDeque::with_capacity(self.pending.len());

        while let Some(save) = self.pending.pop_front() {
            match Self::send_with_retry(transport, path, &save, params).await {
                Ok(()) => {
                    debug!(
                        "Response saved for question {} (choice {})",
                        save.question, save.choice
                    );
                    status.saved.push(save.question);
                }
                Err(e) => {
                    warn!("Error saving response for question {}: {}", save.question, e);
                    status.last_error = Some(e.to_string());
                    status.unsaved.push(save.question);
                    still_pending.push_back(save);
                }
            }
        }

        self.pending = still_pending;
        status
    }

    async fn send_with_retry(
        transport: &dyn Transport,
        path: &str,
        save: &PendingSave,
        params: &AssessmentParams,
    ) -> Result<(), TransportError> {
        let body = serde_json::to_value(SubmitResponseBody::from(save))
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        let attempts = params.save_attempts.max(1);

        let mut failures = 0;
        loop {
            match transport.post_json(path, Some(&body)).await {
                Ok(_) => return Ok(()),
                Err(e) => {
                    failures += 1;
                    if failures >= attempts || !e.is_transient() {
                        return Err(e);
                    }
                    let delay = params.backoff_for(failures);
                    debug!(
                        "Save attempt {}/{} for question {} failed ({}), retrying in {:?}",
                        failures, attempts, save.question, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockTransport;
    use serde_json::json;
    use std::time::Duration;

    const PATH: &str = "/assessments/api/sessions/1/submit_response/";

    fn params() -> AssessmentParams {
        AssessmentParams::default().with_save_backoff(Duration::from_millis(10))
    }

    #[test]
    fn test_enqueue_coalesces_same_question() {
        let mut queue = SaveQueue::new();
        queue.enqueue(QuestionId(1), ChoiceId(10), 3);
        queue.enqueue(QuestionId(2), ChoiceId(20), 4);
        queue.enqueue(QuestionId(1), ChoiceId(11), 5);

        let pending: Vec<_> = queue.pending().cloned().collect();
        assert_eq!(
            pending,
            vec![
                PendingSave {
                    question: QuestionId(1),
                    choice: ChoiceId(11),
                    response_time: 5
                },
                PendingSave {
                    question: QuestionId(2),
                    choice: ChoiceId(20),
                    response_time: 4
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_flush_sends_in_order() {
        let transport = MockTransport::new();
        transport.respond_post(PATH, Ok(json!({"status": "Response saved"})));

        let mut queue = SaveQueue::new();
        queue.enqueue(QuestionId(3), ChoiceId(30), 1);
        queue.enqueue(QuestionId(1), ChoiceId(10), 2);

        let status = queue.flush(&transport, PATH, &params()).await;
        assert!(status.is_clean());
        assert_eq!(status.saved, vec![QuestionId(3), QuestionId(1)]);
        assert!(queue.is_empty());

        let bodies = transport.post_bodies(PATH);
        assert_eq!(
            bodies,
            vec![
                json!({"question_id": 3, "answer_id": 30, "response_time": 1}),
                json!({"question_id": 1, "answer_id": 10, "response_time": 2}),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_is_retried() {
        let transport = MockTransport::new();
        transport.respond_post(PATH, Err(TransportError::Timeout));
        transport.respond_post(PATH, Ok(json!({"status": "Response saved"})));

        let mut queue = SaveQueue::new();
        queue.enqueue(QuestionId(1), ChoiceId(10), 1);

        let status = queue.flush(&transport, PATH, &params()).await;
        assert!(status.is_clean());
        assert_eq!(transport.post_count(PATH), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistent_failure_stays_queued() {
        let transport = MockTransport::new();
        transport.respond_post(
            PATH,
            Err(TransportError::Status {
                status: 503,
                body: None,
            }),
        );

        let mut queue = SaveQueue::new();
        queue.enqueue(QuestionId(1), ChoiceId(10), 1);

        let status = queue.flush(&transport, PATH, &params()).await;
        assert_eq!(status.unsaved, vec![QuestionId(1)]);
        assert!(status.last_error.is_some());
        assert_eq!(queue.len(), 1);
        assert_eq!(transport.post_count(PATH), 3);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let transport = MockTransport::new();
        transport.respond_post(
            PATH,
            Err(TransportError::Status {
                status: 400,
                body: Some(json!({"error": "Invalid question or answer"})),
            }),
        );

        let mut queue = SaveQueue::new();
        queue.enqueue(QuestionId(1), ChoiceId(10), 1);

        let status = queue.flush(&transport, PATH, &params()).await;
        assert_eq!(status.unsaved, vec![QuestionId(1)]);
        assert_eq!(transport.post_count(PATH), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_sends_only_the_given_answer() {
        let transport = MockTransport::new();
        transport.respond_post(PATH, Err(TransportError::Timeout));

        let mut queue = SaveQueue::new();
        for (i, question) in [1, 2, 3, 4].into_iter().enumerate() {
            queue.enqueue(QuestionId(question), ChoiceId(question * 10), 1);
            let status = queue
                .save(QuestionId(question), &transport, PATH, &params())
                .await;
            assert_eq!(status.unsaved.len(), i + 1);
            // Each answer costs its own retries, never the backlog's
            assert_eq!(transport.post_count(PATH), 3 * (i + 1));
        }

        let bodies = transport.post_bodies(PATH);
        assert!(bodies[9..].iter().all(|b| b["question_id"] == json!(4)));
        assert_eq!(queue.len(), 4);
    }

    #[tokio::test]
    async fn test_save_keeps_older_leftovers_queued() {
        let transport = MockTransport::new();
        transport.respond_post(PATH, Ok(json!({})));

        let mut queue = SaveQueue::new();
        queue.enqueue(QuestionId(1), ChoiceId(10), 1);
        queue.enqueue(QuestionId(2), ChoiceId(20), 1);

        let status = queue.save(QuestionId(2), &transport, PATH, &params()).await;
        assert_eq!(status.saved, vec![QuestionId(2)]);
        assert_eq!(status.unsaved, vec![QuestionId(1)]);
        assert_eq!(transport.post_count(PATH), 1);
    }

    #[tokio::test]
    async fn test_failed_answer_does_not_block_later_ones() {
        let transport = MockTransport::new();
        transport.respond_post(PATH, Err(TransportError::MissingCsrfToken));
        transport.respond_post(PATH, Ok(json!({})));

        let mut queue = SaveQueue::new();
        queue.enqueue(QuestionId(1), ChoiceId(10), 1);
        queue.enqueue(QuestionId(2), ChoiceId(20), 1);

        let status = queue.flush(&transport, PATH, &params()).await;
        assert_eq!(status.saved, vec![QuestionId(2)]);
        assert_eq!(status.unsaved, vec![QuestionId(1)]);

        // The next flush retries the leftover answer
        let status = queue.flush(&transport, PATH, &params()).await;
        assert!(status.is_clean());
        assert!(queue.is_empty());
    }
}
