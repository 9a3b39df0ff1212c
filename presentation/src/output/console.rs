//! Console output formatter for assessment results

use colored::Colorize;
use compass_domain::{AssessmentResult, sanitize_terminal};

/// Formats assessment results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the completed assessment result
    pub fn format_result(result: &AssessmentResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Your Personality Profile"));
        output.push('\n');

        match result.personality_type.as_ref() {
            Some(kind) => {
                let title = if kind.name.is_empty() {
                    kind.mbti_type.clone()
                } else {
                    format!("{} - {}", kind.mbti_type, kind.name)
                };
                output.push_str(&format!(
                    "\n{} {}\n",
                    "Type:".cyan().bold(),
                    sanitize_terminal(&title).bold()
                ));
                if !kind.description.is_empty() {
                    output.push_str(&format!("\n{}\n", sanitize_terminal(&kind.description)));
                }
                for (label, text) in [
                    ("Strengths:", &kind.strengths),
                    ("Weaknesses:", &kind.weaknesses),
                    ("Career Recommendations:", &kind.career_recommendations),
                ] {
                    if !text.is_empty() {
                        output.push_str(&Self::section_header(label));
                        output.push_str(&Self::indent(&sanitize_terminal(text), "  "));
                        output.push('\n');
                    }
                }
            }
            None => {
                output.push_str(&format!(
                    "\n{}\n",
                    "No personality type was assigned.".yellow()
                ));
            }
        }

        let scores = result.dimension_scores();
        if !scores.is_empty() {
            output.push_str(&Self::section_header("Dimension Scores:"));
            for (label, score) in scores {
                output.push_str(&format!("  {:<4} {:>7.2}\n", label, score));
            }
        }

        if let Some(confidence) = result.confidence {
            output.push_str(&format!(
                "\n{} {:.0}%\n",
                "Confidence:".dimmed(),
                confidence * 100.0
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", title.cyan().bold())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
