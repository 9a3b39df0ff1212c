//! Transport port
//!
//! Defines how controllers talk to the backend API. Adapters own the base
//! URL, cookies and CSRF handling; controllers only see paths and JSON.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while exchanging a request with the backend
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: Option<Value> },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("CSRF token not found")]
    MissingCsrfToken,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// The `error` field of a JSON error body, if the server sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Status {
                body: Some(body), ..
            } => body.get("error").and_then(Value::as_str),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether repeating the same request could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Connection(_) | TransportError::Timeout => true,
            TransportError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Gateway to the backend HTTP API.
///
/// `post_json` is for state-changing requests: implementations attach the
/// anti-forgery token. A successful response with an empty body yields
/// [`Value::Null`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` and return the decoded JSON body
    async fn get_json(&self, path: &str) -> Result<Value, TransportError>;

    /// POST to `path`, optionally with a JSON body, and return the decoded JSON body
    async fn post_json(&self, path: &str, body: Option<&Value>) -> Result<Value, TransportError>;
}

/// Decode a JSON body into a typed payload
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, TransportError> {
    serde_json::from_value(value).map_err(|e| TransportError::Decode(e.to_string()))
}
