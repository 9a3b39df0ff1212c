//! Terminal assessment renderer

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use compass_application::{AssessmentRenderer, QuestionView, SaveStatus};
use compass_domain::{AssessmentResult, Navigation, Progress, sanitize_terminal};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

const BAR_WIDTH: usize = 30;

/// Draws questions, progress and navigation hints on stdout
pub struct TerminalAssessmentRenderer {
    loading: Mutex<Option<ProgressBar>>,
}

impl TerminalAssessmentRenderer {
    pub fn new() -> Self {
        Self {
            loading: Mutex::new(None),
        }
    }

    /// Question text plus one numbered row per choice; the selected row is marked
    pub fn format_question(view: &QuestionView<'_>) -> String {
        let question = view.question;
        let mut output = format!(
            "\n{}\n{}\n\n",
            format!("Question {} of {}", view.index + 1, view.total)
                .cyan()
                .bold(),
            sanitize_terminal(&question.text).bold()
        );

        if !question.has_choices() {
            output.push_str(&format!("  {}\n", "No answer options available".red()));
            return output;
        }

        for (i, choice) in question.choices.iter().enumerate() {
            let selected = view.selected == Some(choice.id);
            let marker = if selected { ">" } else { " " };
            let row = format!(
                "{} {}. {}  {}",
                marker,
                i + 1,
                sanitize_terminal(&choice.text),
                format!("(Value: {})", choice.value_label()).dimmed()
            );
            if selected {
                output.push_str(&format!("{}\n", row.blue().bold()));
            } else {
                output.push_str(&format!("{}\n", row));
            }
        }
        output
    }

    /// `[=====.....] 50% answered`
    pub fn format_progress(progress: &Progress) -> String {
        let filled = (progress.percent() as usize * BAR_WIDTH) / 100;
        format!(
            "[{}{}] {}% answered",
            "=".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            progress.percent()
        )
    }

    /// Command hints matching the controls that are currently available
    pub fn format_navigation(navigation: &Navigation) -> String {
        let mut hints = vec!["1-9 select"];
        if navigation.previous_enabled {
            hints.push("p previous");
        }
        if navigation.next_visible {
            hints.push("n next");
        }
        if navigation.finish_visible {
            hints.push("n summary");
            hints.push(if navigation.finish_enabled {
                "f finish"
            } else {
                "f finish early"
            });
        }
        hints.push("q quit");
        hints.join(" | ")
    }

    pub fn format_summary(progress: &Progress) -> String {
        let mut output = format!(
            "\n{}\nYou've answered {} out of {} questions.\n",
            "Assessment Complete!".green().bold(),
            progress.answered,
            progress.total
        );
        if progress.is_complete() {
            output.push_str(&format!(
                "{}\n",
                "All questions answered! Ready to see your results.".green()
            ));
        } else {
            output.push_str(&format!(
                "{}\n",
                "You can still go back and answer remaining questions.".yellow()
            ));
        }
        output.push_str("\n  f  View my results\n  r  Review answers\n");
        output
    }

    fn stop_loading(&self) {
        if let Ok(mut loading) = self.loading.lock()
            && let Some(spinner) = loading.take()
        {
            spinner.finish_and_clear();
        }
    }
}

impl Default for TerminalAssessmentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentRenderer for TerminalAssessmentRenderer {
    fn show_loading(&self, message: &str) {
        self.stop_loading();
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut loading) = self.loading.lock() {
            *loading = Some(spinner);
        }
    }

    fn hide_loading(&self) {
        self.stop_loading();
    }

    fn show_question(&self, view: &QuestionView<'_>) {
        print!("{}", Self::format_question(view));
    }

    fn show_progress(&self, progress: &Progress) {
        println!("\n{}", Self::format_progress(progress).dimmed());
    }

    fn show_navigation(&self, navigation: &Navigation) {
        println!("{}", Self::format_navigation(navigation).dimmed());
    }

    fn show_completion_summary(&self, progress: &Progress) {
        print!("{}", Self::format_summary(progress));
    }

    fn show_save_status(&self, status: &SaveStatus) {
        if status.is_clean() {
            return;
        }
        println!(
            "{} {} answer(s) not saved yet; they will be retried{}",
            "!".yellow().bold(),
            status.unsaved.len(),
            status
                .last_error
                .as_deref()
                .map(|e| format!(" ({})", e))
                .unwrap_or_default()
        );
    }

    fn show_error(&self, message: &str) {
        self.stop_loading();
        eprintln!("\n{} {}", "Error:".red().bold(), sanitize_terminal(message));
        eprintln!("Run the assessment again to start over.");
    }

    fn redirect(&self, path: &str, result: Option<&AssessmentResult>) {
        self.stop_loading();
        match result {
            Some(result) => println!("{}", ConsoleFormatter::format_result(result)),
            None => println!("{}", "Assessment submitted.".green().bold()),
        }
        println!("Full results: {}", path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_domain::{Choice, ChoiceId, Question, QuestionId};

    fn question() -> Question {
        Question {
            id: QuestionId(1),
            text: "I enjoy large gatherings".to_string(),
            category: Some("EI".to_string()),
            choices: vec![
                Choice {
                    id: ChoiceId(11),
                    text: "Agree".to_string(),
                    value: 2,
                },
                Choice {
                    id: ChoiceId(12),
                    text: "Disagree".to_string(),
                    value: -2,
                },
            ],
        }
    }

    #[test]
    fn test_question_marks_selection() {
        colored::control::set_override(false);
        let question = question();
        let text = TerminalAssessmentRenderer::format_question(&QuestionView {
            question: &question,
            selected: Some(ChoiceId(12)),
            index: 0,
            total: 4,
        });
        assert!(text.contains("Question 1 of 4"));
        assert!(text.contains("  1. Agree  (Value: +2)"));
        assert!(text.contains("> 2. Disagree  (Value: -2)"));
    }

    #[test]
    fn test_question_without_choices() {
        colored::control::set_override(false);
        let mut question = question();
        question.choices.clear();
        let text = TerminalAssessmentRenderer::format_question(&QuestionView {
            question: &question,
            selected: None,
            index: 0,
            total: 1,
        });
        assert!(text.contains("No answer options available"));
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(
            TerminalAssessmentRenderer::format_progress(&Progress::new(1, 2, 0)),
            format!("[{}{}] 50% answered", "=".repeat(15), ".".repeat(15))
        );
        assert!(
            TerminalAssessmentRenderer::format_progress(&Progress::new(0, 0, 0))
                .ends_with("0% answered")
        );
    }

    #[test]
    fn test_navigation_hints() {
        let first = Navigation::derive(&Progress::new(0, 3, 0));
        assert_eq!(
            TerminalAssessmentRenderer::format_navigation(&first),
            "1-9 select | n next | q quit"
        );

        let last = Navigation::derive(&Progress::new(3, 3, 2));
        assert_eq!(
            TerminalAssessmentRenderer::format_navigation(&last),
            "1-9 select | p previous | n summary | f finish | q quit"
        );
    }
}
