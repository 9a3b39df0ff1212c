//! Application layer for compass
//!
//! This crate contains the chat and assessment controllers, the ports they
//! drive, and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AssessmentParams, Endpoints};
pub use ports::{
    confirmation::{AutoConfirm, AutoDecline, ConfirmationError, ConfirmationPort},
    renderer::{AssessmentRenderer, ChatRenderer, QuestionView},
    response_time::{FixedResponseTime, ResponseTimeSource},
    transcript::{NoTranscript, TranscriptEvent, TranscriptLogger},
    transport::{Transport, TransportError},
};
pub use use_cases::assessment::{AssessmentController, AssessmentError, FinishOutcome};
pub use use_cases::chat::{ChatController, ChatError, ChatOutcome, ChatState};
pub use use_cases::save_queue::{PendingSave, SaveQueue, SaveStatus};
