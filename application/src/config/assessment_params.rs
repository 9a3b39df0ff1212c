//! Assessment flow parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Policy knobs for [`AssessmentController`](crate::use_cases::assessment::AssessmentController).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentParams {
    /// Finishing with fewer answers than this asks for confirmation first.
    pub min_answers: usize,
    /// Attempts per answer save before it is reported as unsaved.
    pub save_attempts: u32,
    /// Delay before the first retry; doubles on each further attempt.
    pub save_backoff: Duration,
    /// Session id used when the server could not create a session.
    pub placeholder_session: String,
}

impl Default for AssessmentParams {
    fn default() -> Self {
        Self {
            min_answers: 5,
            save_attempts: 3,
            save_backoff: Duration::from_millis(250),
            placeholder_session: "demo-session".to_string(),
        }
    }
}

impl AssessmentParams {
    pub fn with_min_answers(mut self, min: usize) -> Self {
        self.min_answers = min;
        self
    }

    pub fn with_save_attempts(mut self, attempts: u32) -> Self {
        self.save_attempts = attempts.max(1);
        self
    }

    pub fn with_save_backoff(mut self, backoff: Duration) -> Self {
        self.save_backoff = backoff;
        self
    }

    pub fn with_placeholder_session(mut self, id: impl Into<String>) -> Self {
        self.placeholder_session = id.into();
        self
    }

    /// Delay before retry number `attempt` (1-based count of failures so far)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.save_backoff.saturating_mul(factor)
    }
}
