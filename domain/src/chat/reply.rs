//! Chat endpoint request and reply payloads

use serde::{Deserialize, Serialize};

/// Text shown whenever an exchange with the assistant fails for any reason.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Body sent to the chat endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Body returned by the chat endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
}

impl ChatReply {
    /// The reply text when the server reported success and sent text back
    pub fn into_text(self) -> Option<String> {
        if self.success { self.response } else { None }
    }
}
