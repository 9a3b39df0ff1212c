//! Assessment configuration from TOML (`[assessment]` section)

use compass_application::AssessmentParams;
use compass_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw assessment flow settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAssessmentConfig {
    /// Finishing with fewer answers asks for confirmation
    pub min_answers: usize,
    /// Attempts per answer save
    pub save_attempts: u32,
    /// Delay before the first save retry, doubled on each further attempt
    pub save_backoff_ms: u64,
    pub placeholder_session: String,
}

impl Default for FileAssessmentConfig {
    fn default() -> Self {
        let params = AssessmentParams::default();
        Self {
            min_answers: params.min_answers,
            save_attempts: params.save_attempts,
            save_backoff_ms: params.save_backoff.as_millis() as u64,
            placeholder_session: params.placeholder_session,
        }
    }
}

impl FileAssessmentConfig {
    pub fn to_params(&self) -> AssessmentParams {
        AssessmentParams::default()
            .with_min_answers(self.min_answers)
            .with_save_attempts(self.save_attempts)
            .with_save_backoff(Duration::from_millis(self.save_backoff_ms))
            .with_placeholder_session(self.placeholder_session.clone())
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.save_attempts == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "assessment.save_attempts".to_string(),
                    value: "0".to_string(),
                },
                "assessment.save_attempts is 0; each answer will still be sent once",
            ));
        }

        if self.placeholder_session.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "assessment.placeholder_session".to_string(),
                },
                "assessment.placeholder_session is empty",
            ));
        }

        issues
    }
}
