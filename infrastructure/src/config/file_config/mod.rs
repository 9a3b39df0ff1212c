//! Raw TOML configuration data types
//!
//! These structs mirror the structure of the TOML config file and are
//! deserialized directly. Sections map to application types through
//! small conversion methods.

mod assessment;
mod chat;
mod logging;
mod output;
mod repl;
mod server;

pub use assessment::FileAssessmentConfig;
pub use chat::FileChatConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use server::FileServerConfig;

use compass_application::Endpoints;
use compass_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend connection
    pub server: FileServerConfig,
    /// API paths, relative to `server.base_url`
    pub endpoints: Endpoints,
    /// Assessment flow policy
    pub assessment: FileAssessmentConfig,
    /// Chat settings
    pub chat: FileChatConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Diagnostic log and transcript locations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.server.validate();
        issues.extend(validate_endpoints(&self.endpoints));
        issues.extend(self.assessment.validate());
        issues
    }
}

fn validate_endpoints(endpoints: &Endpoints) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let paths = [
        ("endpoints.questions", &endpoints.questions),
        ("endpoints.sessions", &endpoints.sessions),
        ("endpoints.submit_response", &endpoints.submit_response),
        ("endpoints.complete_assessment", &endpoints.complete_assessment),
        ("endpoints.results_page", &endpoints.results_page),
        ("endpoints.chat", &endpoints.chat),
    ];

    for (field, value) in paths {
        if !value.starts_with('/') {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::RelativeEndpoint {
                    field: field.to_string(),
                    value: value.clone(),
                },
                format!("{}: '{}' must start with '/'", field, value),
            ));
        }
    }

    for (field, value) in [
        ("endpoints.submit_response", &endpoints.submit_response),
        ("endpoints.complete_assessment", &endpoints.complete_assessment),
    ] {
        if !value.contains("{id}") {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingSessionPlaceholder {
                    field: field.to_string(),
                },
                format!("{}: '{}' has no {{id}} placeholder", field, value),
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_domain::Severity;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[server]
base_url = "https://careers.example.edu"
request_timeout_secs = 10

[server.cookies]
sessionid = "abc123"

[endpoints]
chat = "/coach/chat/"

[assessment]
min_answers = 8
save_backoff_ms = 500

[chat]
quick_questions = ["Is teaching a good fit for me?"]

[output]
color = false

[repl]
history_file = "~/.local/share/compass/history.txt"

[logging]
transcript = "/tmp/compass.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url, "https://careers.example.edu");
        assert_eq!(config.server.request_timeout_secs, 10);
        assert_eq!(config.server.cookies.get("sessionid").unwrap(), "abc123");
        assert_eq!(config.endpoints.chat, "/coach/chat/");
        // Unset endpoints keep their defaults
        assert_eq!(config.endpoints.questions, "/assessments/api/questions/");
        assert_eq!(config.assessment.min_answers, 8);
        assert_eq!(config.assessment.save_attempts, 3);
        assert_eq!(config.chat.quick_questions.len(), 1);
        assert!(!config.output.color);
        assert_eq!(
            config.logging.transcript.as_deref(),
            Some("/tmp/compass.jsonl")
        );
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.csrf_page, "/assessments/start/");
        assert_eq!(config.assessment.min_answers, 5);
        assert_eq!(config.assessment.placeholder_session, "demo-session");
        assert!(config.output.color);
        assert!(!config.chat.quick_questions.is_empty());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_bad_base_url() {
        let mut config = FileConfig::default();
        config.server.base_url = "ftp://example.com".to_string();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(matches!(
            issues[0].code,
            ConfigIssueCode::InvalidBaseUrl { .. }
        ));

        config.server.base_url = "  ".to_string();
        assert!(matches!(
            config.validate()[0].code,
            ConfigIssueCode::EmptyValue { .. }
        ));
    }

    #[test]
    fn test_validate_endpoints() {
        let mut config = FileConfig::default();
        config.endpoints.chat = "ai-coach/api/chat/".to_string();
        config.endpoints.submit_response = "/assessments/api/sessions/submit/".to_string();

        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::RelativeEndpoint { field, .. } if field == "endpoints.chat"
        )));
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::MissingSessionPlaceholder { field } if field == "endpoints.submit_response"
        )));
    }

    #[test]
    fn test_zero_save_attempts_is_warning() {
        let mut config = FileConfig::default();
        config.assessment.save_attempts = 0;
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }
}
