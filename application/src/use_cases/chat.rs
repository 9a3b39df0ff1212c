//! Chat controller.
//!
//! Relays one user message at a time to the coaching assistant and renders
//! both sides of the exchange. Any failure collapses into the fixed
//! [`FALLBACK_REPLY`]; there is no retry.
//!
//! Submitting needs `&mut self`, so a second message cannot be sent while
//! one is still awaiting its reply.

use crate::ports::renderer::ChatRenderer;
use crate::ports::transcript::{NoTranscript, TranscriptEvent, TranscriptLogger};
use crate::ports::transport::{Transport, TransportError, decode};
use compass_domain::{ChatLog, ChatReply, ChatRequest, FALLBACK_REPLY, Message, preview};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Why an exchange fell back to [`FALLBACK_REPLY`]
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Assistant reported failure")]
    Unsuccessful,
}

/// Result of one [`ChatController::submit`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Input was empty; nothing was sent or shown
    Ignored,
    /// The assistant answered
    Replied(String),
    /// The exchange failed and the fallback text was shown
    Fallback,
}

/// Controller state between submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingReply,
}

pub struct ChatController {
    transport: Arc<dyn Transport>,
    renderer: Arc<dyn ChatRenderer>,
    transcript: Arc<dyn TranscriptLogger>,
    endpoint: String,
    quick_questions: Vec<String>,
    log: ChatLog,
    state: ChatState,
}

impl ChatController {
    pub fn new(
        transport: Arc<dyn Transport>,
        renderer: Arc<dyn ChatRenderer>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            renderer,
            transcript: Arc::new(NoTranscript),
            endpoint: endpoint.into(),
            quick_questions: Vec::new(),
            log: ChatLog::new(),
            state: ChatState::Idle,
        }
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn with_quick_questions(mut self, questions: Vec<String>) -> Self {
        self.quick_questions = questions;
        self
    }

    pub fn quick_questions(&self) -> &[String] {
        &self.quick_questions
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// Submit the quick question at 1-based `position`, as if it were typed.
    ///
    /// Returns `None` when there is no quick question at that position.
    pub async fn submit_quick(&mut self, position: usize) -> Option<ChatOutcome> {
        let text = position
            .checked_sub(1)
            .and_then(|i| self.quick_questions.get(i))
            .cloned()?;
        Some(self.submit(&text).await)
    }

    /// Send `text` to the assistant and render the exchange.
    pub async fn submit(&mut self, text: &str) -> ChatOutcome {
        let Ok(message) = Message::user(text) else {
            return ChatOutcome::Ignored;
        };

        info!("Sending chat message: {}", preview(message.content(), 80));
        let content = message.content().to_string();
        self.append(message);
        self.renderer.clear_input();

        self.state = ChatState::AwaitingReply;
        self.renderer.show_typing();

        let result = self.exchange(&content).await;

        self.renderer.remove_typing();
        self.state = ChatState::Idle;

        match result {
            Ok(reply) => {
                debug!("Assistant replied: {}", preview(&reply, 80));
                self.append(Message::assistant(reply.clone()));
                ChatOutcome::Replied(reply)
            }
            Err(e) => {
                error!("Failed to send message: {}", e);
                self.append(Message::assistant(FALLBACK_REPLY));
                ChatOutcome::Fallback
            }
        }
    }

    async fn exchange(&self, content: &str) -> Result<String, ChatError> {
        let body = serde_json::to_value(ChatRequest { message: content })
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        let value = self.transport.post_json(&self.endpoint, Some(&body)).await?;
        let reply: ChatReply = decode(value)?;
        reply.into_text().ok_or(ChatError::Unsuccessful)
    }

    fn append(&mut self, message: Message) {
        self.transcript.log(TranscriptEvent::chat_message(
            message.sender().as_str(),
            message.content(),
        ));
        let stored = self.log.push(message);
        self.renderer.append_message(stored);
        self.renderer.scroll_to_bottom();
    }
}
