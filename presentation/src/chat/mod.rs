//! Interactive chat module
//!
//! Provides the line-editor chat loop and the chat renderers: a terminal
//! renderer and an HTML transcript.

mod html;
mod renderer;
mod repl;

pub use html::HtmlTranscript;
pub use renderer::{TeeChatRenderer, TerminalChatRenderer};
pub use repl::{ChatRepl, ReplInput};
