//! Backend endpoint paths.
//!
//! Session-scoped paths are templates containing `{id}`.

use compass_domain::SessionId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub questions: String,
    pub sessions: String,
    pub submit_response: String,
    pub complete_assessment: String,
    pub results_page: String,
    pub chat: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            questions: "/assessments/api/questions/".to_string(),
            sessions: "/assessments/api/sessions/".to_string(),
            submit_response: "/assessments/api/sessions/{id}/submit_response/".to_string(),
            complete_assessment: "/assessments/api/sessions/{id}/complete_assessment/"
                .to_string(),
            results_page: "/assessments/results/".to_string(),
            chat: "/ai-coach/api/chat/".to_string(),
        }
    }
}

impl Endpoints {
    pub fn submit_response_for(&self, session: &SessionId) -> String {
        self.submit_response.replace("{id}", session.as_str())
    }

    pub fn complete_assessment_for(&self, session: &SessionId) -> String {
        self.complete_assessment.replace("{id}", session.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_templates() {
        let endpoints = Endpoints::default();
        let id = SessionId::new("17");
        assert_eq!(
            endpoints.submit_response_for(&id),
            "/assessments/api/sessions/17/submit_response/"
        );
        assert_eq!(
            endpoints.complete_assessment_for(&id),
            "/assessments/api/sessions/17/complete_assessment/"
        );
    }
}
