//! Presentation layer for compass
//!
//! This crate contains CLI definitions, terminal and HTML renderers,
//! the interactive chat REPL and the assessment runner.

pub mod assessment;
pub mod chat;
pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use assessment::{
    AssessmentRunner, InteractiveConfirmation, RunOutcome, TerminalAssessmentRenderer,
};
pub use chat::{ChatRepl, HtmlTranscript, TeeChatRenderer, TerminalChatRenderer};
pub use cli::commands::{Cli, Command};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
