//! Interactive yes/no confirmation on stdin.

use async_trait::async_trait;
use colored::Colorize;
use compass_application::{ConfirmationError, ConfirmationPort};
use std::io::{self, BufRead, Write};

/// Asks on the terminal and waits for `y` or `n`.
///
/// End of input counts as cancellation.
pub struct InteractiveConfirmation;

impl InteractiveConfirmation {
    pub fn new() -> Self {
        Self
    }

    /// `Some(answer)` for a recognised reply, `None` to ask again
    pub fn parse_answer(input: &str) -> Option<bool> {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => None,
        }
    }

    fn ask(prompt: &str) -> Result<bool, ConfirmationError> {
        let stdin = io::stdin();
        loop {
            print!("{} {} ", prompt.yellow(), "[y/N]".dimmed());
            io::stdout()
                .flush()
                .map_err(|e| ConfirmationError::Io(format!("Failed to flush stdout: {}", e)))?;

            let mut input = String::new();
            let read = stdin
                .lock()
                .read_line(&mut input)
                .map_err(|e| ConfirmationError::Io(format!("Failed to read input: {}", e)))?;
            if read == 0 {
                return Err(ConfirmationError::Cancelled);
            }
            if input.trim().is_empty() {
                return Ok(false);
            }
            match Self::parse_answer(&input) {
                Some(answer) => return Ok(answer),
                None => println!("Please answer y or n."),
            }
        }
    }
}

impl Default for InteractiveConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfirmationPort for InteractiveConfirmation {
    async fn confirm(&self, prompt: &str) -> Result<bool, ConfirmationError> {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || Self::ask(&prompt))
            .await
            .map_err(|e| ConfirmationError::Io(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(InteractiveConfirmation::parse_answer("y"), Some(true));
        assert_eq!(InteractiveConfirmation::parse_answer(" YES\n"), Some(true));
        assert_eq!(InteractiveConfirmation::parse_answer("n"), Some(false));
        assert_eq!(InteractiveConfirmation::parse_answer("maybe"), None);
    }
}
