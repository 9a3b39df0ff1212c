//! Structured configuration issues.
//!
//! Config loaders report problems as [`ConfigIssue`] values instead of
//! failing outright, so the binary can print warnings and only stop on
//! [`Severity::Error`].

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the client cannot talk to the server with this configuration.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A required value is empty.
    EmptyValue { field: String },
    /// The base URL is not an absolute http(s) URL.
    InvalidBaseUrl { value: String },
    /// An endpoint path does not start with `/`.
    RelativeEndpoint { field: String, value: String },
    /// A session endpoint template lacks the `{id}` placeholder.
    MissingSessionPlaceholder { field: String },
    /// A numeric setting is out of its usable range.
    OutOfRange { field: String, value: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}
