//! Terminal chat renderer

use colored::Colorize;
use compass_application::ChatRenderer;
use compass_domain::{Message, Sender, sanitize_terminal};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Prints chat messages to stdout and shows a spinner while the coach replies.
///
/// Message text is passed through [`sanitize_terminal`] so server replies
/// cannot emit escape sequences.
pub struct TerminalChatRenderer {
    echo_user: bool,
    typing: Mutex<Option<ProgressBar>>,
}

impl TerminalChatRenderer {
    pub fn new() -> Self {
        Self {
            echo_user: true,
            typing: Mutex::new(None),
        }
    }

    /// Skip printing user messages, for line editors that already show them
    pub fn without_user_echo(mut self) -> Self {
        self.echo_user = false;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Label and body lines for a message, without trailing newline
    pub fn format_message(message: &Message) -> String {
        let label = match message.sender() {
            Sender::User => "You:".green().bold(),
            Sender::Assistant => "Coach:".blue().bold(),
        };
        format!("{} {}", label, sanitize_terminal(message.content()))
    }
}

impl Default for TerminalChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRenderer for TerminalChatRenderer {
    fn append_message(&self, message: &Message) {
        if message.is_user() && !self.echo_user {
            return;
        }
        println!("{}", Self::format_message(message));
        println!();
    }

    fn show_typing(&self) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_message("Coach is typing...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut typing) = self.typing.lock() {
            *typing = Some(spinner);
        }
    }

    fn remove_typing(&self) {
        if let Ok(mut typing) = self.typing.lock()
            && let Some(spinner) = typing.take()
        {
            spinner.finish_and_clear();
        }
    }
}

/// Forwards every call to several renderers in order
pub struct TeeChatRenderer {
    renderers: Vec<Arc<dyn ChatRenderer>>,
}

impl TeeChatRenderer {
    pub fn new(renderers: Vec<Arc<dyn ChatRenderer>>) -> Self {
        Self { renderers }
    }
}

impl ChatRenderer for TeeChatRenderer {
    fn append_message(&self, message: &Message) {
        self.renderers.iter().for_each(|r| r.append_message(message));
    }

    fn show_typing(&self) {
        self.renderers.iter().for_each(|r| r.show_typing());
    }

    fn remove_typing(&self) {
        self.renderers.iter().for_each(|r| r.remove_typing());
    }

    fn clear_input(&self) {
        self.renderers.iter().for_each(|r| r.clear_input());
    }

    fn scroll_to_bottom(&self) {
        self.renderers.iter().for_each(|r| r.scroll_to_bottom());
    }
}
