//! Chat message entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in the chat log (Value Object)
///
/// Messages are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    content: String,
    sender: Sender,
}

impl Message {
    /// Create a user message from raw input.
    ///
    /// The input is trimmed; whitespace-only input is rejected.
    pub fn user(content: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        Ok(Self {
            content: trimmed.to_string(),
            sender: Sender::User,
        })
    }

    /// Create an assistant message. Assistant text is kept verbatim.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sender: Sender::Assistant,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Ordered, append-only log of chat messages for one run.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<Message>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a reference to the stored copy
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        // push above guarantees a last element
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
