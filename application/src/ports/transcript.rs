//! Port for structured transcript logging.
//!
//! Records chat messages and assessment milestones to a machine-readable
//! log. This is separate from `tracing` diagnostics.

use serde_json::{Value, json};

/// A structured transcript event.
pub struct TranscriptEvent {
    /// Event type identifier (e.g. "chat_message", "answer_saved").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn chat_message(sender: &str, content: &str) -> Self {
        Self::new(
            "chat_message",
            json!({ "sender": sender, "content": content }),
        )
    }
}

/// Sink for transcript events.
///
/// `log` is synchronous and infallible; write failures are the adapter's
/// problem and never interrupt a flow.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoTranscript;

impl TranscriptLogger for NoTranscript {
    fn log(&self, _event: TranscriptEvent) {}
}
