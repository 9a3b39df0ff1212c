//! REPL (Read-Eval-Print Loop) for interactive chat

use colored::Colorize;
use compass_application::{ChatController, ChatOutcome};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// One line of REPL input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Empty,
    Message(String),
    /// `/quick`: list the quick questions
    ListQuick,
    /// `/N`: send quick question N (1-based)
    Quick(usize),
    Help,
    Quit,
    Unknown(String),
}

impl ReplInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplInput::Empty;
        }
        let Some(command) = line.strip_prefix('/') else {
            return ReplInput::Message(line.to_string());
        };
        // `//text` sends `/text`; slash text that is not a single word is a message
        if command.starts_with('/') {
            return ReplInput::Message(command.to_string());
        }
        if command.is_empty() || command.contains(|c: char| c.is_whitespace() || c == '/') {
            return ReplInput::Message(line.to_string());
        }
        match command {
            "quit" | "exit" | "q" => ReplInput::Quit,
            "help" | "h" | "?" => ReplInput::Help,
            "quick" => ReplInput::ListQuick,
            n => match n.parse::<usize>() {
                Ok(position) => ReplInput::Quick(position),
                Err(_) => ReplInput::Unknown(line.to_string()),
            },
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: ChatController,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(controller: ChatController) -> Self {
        Self {
            controller,
            history_path: None,
        }
    }

    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    pub fn controller(&self) -> &ChatController {
        &self.controller
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = self.history_path.as_ref() else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Could not create history directory {}: {}", parent.display(), e);
            }
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("coach".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            let line = match editor.read_line(&prompt)? {
                Signal::Success(line) => line,
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => {
                    println!("^C");
                    continue;
                }
            };

            match ReplInput::parse(&line) {
                ReplInput::Empty => continue,
                ReplInput::Quit => {
                    println!("Bye!");
                    break;
                }
                ReplInput::Help => self.print_help(),
                ReplInput::ListQuick => self.print_quick_questions(),
                ReplInput::Quick(position) => {
                    if self.controller.submit_quick(position).await.is_none() {
                        println!("No quick question #{}; type /quick to list them", position);
                    }
                }
                ReplInput::Message(text) => {
                    if let ChatOutcome::Fallback = self.controller.submit(&text).await {
                        warn!("Chat exchange fell back to the error reply");
                    }
                }
                ReplInput::Unknown(command) => {
                    println!("Unknown command: {}", command);
                    println!("Type /help for available commands");
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           Compass - AI Career Coach         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Ask anything about careers, study plans or your personality type.");
        self.print_help();
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Commands:".cyan().bold());
        println!("  /quick          - List quick questions");
        println!("  /N              - Send quick question N");
        println!("  /help, /h, /?   - Show this help");
        println!("  /quit, /exit, /q - Exit chat");
        println!("  //text          - Send a message starting with /");
        println!();
    }

    fn print_quick_questions(&self) {
        let questions = self.controller.quick_questions();
        if questions.is_empty() {
            println!("No quick questions configured.");
            return;
        }
        println!();
        println!("{}", "Quick questions:".cyan().bold());
        for (i, question) in questions.iter().enumerate() {
            println!("  /{}  {}", i + 1, question);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use compass_application::{ChatRenderer, Transport, TransportError};
    use compass_domain::Message;
    use serde_json::Value;
    use std::sync::Arc;

    struct Offline;

    #[async_trait]
    impl Transport for Offline {
        async fn get_json(&self, _path: &str) -> Result<Value, TransportError> {
            Err(TransportError::Timeout)
        }

        async fn post_json(&self, _path: &str, _body: Option<&Value>) -> Result<Value, TransportError> {
            Err(TransportError::Timeout)
        }
    }

    struct Silent;

    impl ChatRenderer for Silent {
        fn append_message(&self, _message: &Message) {}
        fn show_typing(&self) {}
        fn remove_typing(&self) {}
    }

    fn chat_controller() -> ChatController {
        ChatController::new(Arc::new(Offline), Arc::new(Silent), "/ai-coach/api/chat/")
    }

    #[test]
    fn test_parse_messages_and_commands() {
        assert_eq!(ReplInput::parse("   "), ReplInput::Empty);
        assert_eq!(
            ReplInput::parse("  What about nursing? "),
            ReplInput::Message("What about nursing?".to_string())
        );
        assert_eq!(ReplInput::parse("/quit"), ReplInput::Quit);
        assert_eq!(ReplInput::parse("/q"), ReplInput::Quit);
        assert_eq!(ReplInput::parse("/?"), ReplInput::Help);
        assert_eq!(ReplInput::parse("/quick"), ReplInput::ListQuick);
        assert_eq!(ReplInput::parse("/2"), ReplInput::Quick(2));
        assert_eq!(
            ReplInput::parse("/models"),
            ReplInput::Unknown("/models".to_string())
        );
    }

    #[test]
    fn test_unusable_history_dir_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let repl = ChatRepl::new(chat_controller())
            .with_history_file(Some(blocker.join("history.txt")));
        let _editor = repl.editor();
        assert!(blocker.is_file());
    }

    #[test]
    fn test_slash_text_can_be_sent() {
        assert_eq!(
            ReplInput::parse("/usr/bin is where tools live"),
            ReplInput::Message("/usr/bin is where tools live".to_string())
        );
        assert_eq!(
            ReplInput::parse("//quit"),
            ReplInput::Message("/quit".to_string())
        );
        assert_eq!(ReplInput::parse("/"), ReplInput::Message("/".to_string()));
    }
}
