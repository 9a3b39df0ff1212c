//! Domain layer for compass
//!
//! This crate contains the entities and value objects of the two client
//! flows. It has no dependencies on transport or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Chat
//!
//! - **Message**: immutable text with a [`Sender`], appended to a [`ChatLog`]
//! - **Fallback reply**: the fixed text shown when an exchange fails
//!
//! ## Assessment
//!
//! - **Question / Choice**: read-only data served by the backend
//! - **ResponseMap**: the client's record of answers, one per question
//! - **Session**: the server-side attempt the answers belong to, or a
//!   local placeholder when the server could not create one
//! - **Progress / Navigation**: derived views of the current position

pub mod assessment;
pub mod chat;
pub mod config;
pub mod core;

// Re-export commonly used types
pub use assessment::{
    phase::AssessmentPhase,
    progress::{Navigation, Progress},
    question::{Choice, ChoiceId, Question, QuestionId},
    responses::ResponseMap,
    result::{AssessmentResult, PersonalityType},
    session::{Session, SessionCreated, SessionId},
};
pub use chat::{
    message::{ChatLog, Message, Sender},
    reply::{ChatReply, ChatRequest, FALLBACK_REPLY},
};
pub use config::validation::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    error::DomainError,
    string::{escape_html, preview, sanitize_terminal},
};
