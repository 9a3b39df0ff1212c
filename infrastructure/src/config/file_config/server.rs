//! Server configuration from TOML (`[server]` section)

use compass_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Raw server connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Backend origin, e.g. `https://careers.example.edu`
    pub base_url: String,
    /// HTML page scanned for the CSRF token
    pub csrf_page: String,
    /// Per-request timeout; 0 disables it
    pub request_timeout_secs: u64,
    pub user_agent: Option<String>,
    /// Extra cookies seeded into the jar (e.g. an authenticated `sessionid`)
    pub cookies: BTreeMap<String, String>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            csrf_page: "/assessments/start/".to_string(),
            request_timeout_secs: 30,
            user_agent: None,
            cookies: BTreeMap::new(),
        }
    }
}

impl FileServerConfig {
    /// `None` when the timeout is disabled
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let base_url = self.base_url.trim();

        if base_url.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "server.base_url".to_string(),
                },
                "server.base_url is empty",
            ));
        } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidBaseUrl {
                    value: self.base_url.clone(),
                },
                format!(
                    "server.base_url '{}' must start with http:// or https://",
                    self.base_url
                ),
            ));
        }

        if !self.csrf_page.starts_with('/') {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::RelativeEndpoint {
                    field: "server.csrf_page".to_string(),
                    value: self.csrf_page.clone(),
                },
                format!(
                    "server.csrf_page '{}' does not start with '/'; it will be resolved relative to the base URL",
                    self.csrf_page
                ),
            ));
        }

        issues
    }
}
