//! Interactive assessment loop.
//!
//! Reads one command per line and drives an [`AssessmentController`]:
//!
//! | Command | Aliases | Action |
//! |---------|---------|--------|
//! | `1`..`N` | | Select choice N of the current question |
//! | `n` | `next` | Next question, or the summary after the last |
//! | `p` | `prev` | Previous question |
//! | `f` | `finish` | Finish and show results |
//! | `r` | `review` | Back to the first question |
//! | `q` | `quit` | Leave without finishing |

use colored::Colorize;
use compass_application::{AssessmentController, AssessmentError, FinishOutcome};
use compass_domain::{AssessmentPhase, AssessmentResult, DomainError};
use std::io::{self, BufRead};
use tracing::debug;

/// One line of runner input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerCommand {
    Select(usize),
    Next,
    Previous,
    Finish,
    Review,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl RunnerCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => RunnerCommand::Empty,
            "n" | "next" => RunnerCommand::Next,
            "p" | "prev" | "previous" => RunnerCommand::Previous,
            "f" | "finish" => RunnerCommand::Finish,
            "r" | "review" => RunnerCommand::Review,
            "h" | "help" | "?" => RunnerCommand::Help,
            "q" | "quit" | "exit" => RunnerCommand::Quit,
            other => match other.parse::<usize>() {
                Ok(position) if position > 0 => RunnerCommand::Select(position),
                _ => RunnerCommand::Unknown(line.to_string()),
            },
        }
    }
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    Completed(Option<AssessmentResult>),
    Quit,
}

/// What the loop should do after one command
#[derive(Debug)]
pub enum Step {
    Continue,
    Stop(RunOutcome),
}

pub struct AssessmentRunner {
    controller: AssessmentController,
}

impl AssessmentRunner {
    pub fn new(controller: AssessmentController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &AssessmentController {
        &self.controller
    }

    /// Load the questions, then read commands from stdin until finished or quit
    pub async fn run(&mut self) -> Result<RunOutcome, AssessmentError> {
        self.controller.load_questions().await?;

        loop {
            let Some(line) = read_line().await else {
                return Ok(RunOutcome::Quit);
            };
            match self.dispatch(RunnerCommand::parse(&line)).await? {
                Step::Continue => continue,
                Step::Stop(outcome) => return Ok(outcome),
            }
        }
    }

    /// Apply one command.
    ///
    /// Invalid input (bad choice number, navigation in the wrong phase) is
    /// reported and the loop continues; completion failures end the run.
    pub async fn dispatch(&mut self, command: RunnerCommand) -> Result<Step, AssessmentError> {
        debug!("Runner command: {:?}", command);
        let result = match command {
            RunnerCommand::Empty => Ok(()),
            RunnerCommand::Help => {
                print_help();
                Ok(())
            }
            RunnerCommand::Quit => return Ok(Step::Stop(RunOutcome::Quit)),
            RunnerCommand::Unknown(input) => {
                println!("Unknown command: {} (h for help)", input);
                Ok(())
            }
            RunnerCommand::Select(position) => {
                if self.controller.phase() == AssessmentPhase::CompletionReview {
                    println!("Press r to review your answers before changing them.");
                    Ok(())
                } else {
                    self.controller.select_choice_at(position).await.map(|_| ())
                }
            }
            RunnerCommand::Next => self.controller.next_question(),
            RunnerCommand::Previous => match self.controller.previous_question() {
                Ok(false) => {
                    println!("Already at the first question.");
                    Ok(())
                }
                other => other.map(|_| ()),
            },
            RunnerCommand::Review => self.controller.restart_review(),
            RunnerCommand::Finish => {
                return match self.controller.finish_assessment().await? {
                    FinishOutcome::Declined => Ok(Step::Continue),
                    FinishOutcome::Completed { result } => {
                        Ok(Step::Stop(RunOutcome::Completed(result)))
                    }
                };
            }
        };

        match result {
            Ok(()) => Ok(Step::Continue),
            Err(AssessmentError::Domain(e)) => {
                report_invalid(&e);
                Ok(Step::Continue)
            }
            Err(AssessmentError::NotReady(phase)) if !phase.is_terminal() => {
                println!("{} not available right now ({})", "!".yellow(), phase);
                Ok(Step::Continue)
            }
            Err(e) => Err(e),
        }
    }
}

fn report_invalid(error: &DomainError) {
    let message = match error {
        DomainError::UnknownChoice { choice, .. } => {
            format!("There is no choice {} for this question.", choice)
        }
        other => other.to_string(),
    };
    println!("{} {}", "!".yellow(), message);
}

fn print_help() {
    println!();
    println!("{}", "Commands:".cyan().bold());
    println!("  1..N   Select a choice");
    println!("  n      Next question");
    println!("  p      Previous question");
    println!("  f      Finish and see results");
    println!("  r      Review from the first question");
    println!("  q      Quit without finishing");
    println!();
}

async fn read_line() -> Option<String> {
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    })
    .await
    .ok()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use compass_application::{
        AssessmentRenderer, AutoDecline, FixedResponseTime, QuestionView, Transport,
        TransportError,
    };
    use compass_domain::{Navigation, Progress};
    use serde_json::{Value, json};
    use std::sync::Arc;

    /// Serves two questions and accepts every POST
    struct StaticBackend;

    #[async_trait]
    impl Transport for StaticBackend {
        async fn get_json(&self, _path: &str) -> Result<Value, TransportError> {
            Ok(json!([
                {"id": 1, "text": "Q1", "choices": [{"id": 11, "text": "Yes", "value": 1}]},
                {"id": 2, "text": "Q2", "choices": [{"id": 21, "text": "Yes", "value": 1}]}
            ]))
        }

        async fn post_json(&self, path: &str, _body: Option<&Value>) -> Result<Value, TransportError> {
            if path.ends_with("complete_assessment/") {
                return Ok(json!({"personality_type": {"mbti_type": "ISTJ"}}));
            }
            Ok(json!({"id": 5}))
        }
    }

    struct SilentRenderer;

    impl AssessmentRenderer for SilentRenderer {
        fn show_loading(&self, _message: &str) {}
        fn hide_loading(&self) {}
        fn show_question(&self, _view: &QuestionView<'_>) {}
        fn show_progress(&self, _progress: &Progress) {}
        fn show_navigation(&self, _navigation: &Navigation) {}
        fn show_completion_summary(&self, _progress: &Progress) {}
        fn show_error(&self, _message: &str) {}
        fn redirect(&self, _path: &str, _result: Option<&AssessmentResult>) {}
    }

    async fn runner() -> AssessmentRunner {
        let mut controller = AssessmentController::new(
            Arc::new(StaticBackend),
            Arc::new(SilentRenderer),
            Arc::new(AutoDecline),
            Arc::new(FixedResponseTime(3)),
        );
        controller.load_questions().await.unwrap();
        AssessmentRunner::new(controller)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(RunnerCommand::parse("2\n"), RunnerCommand::Select(2));
        assert_eq!(RunnerCommand::parse("N"), RunnerCommand::Next);
        assert_eq!(RunnerCommand::parse("prev"), RunnerCommand::Previous);
        assert_eq!(RunnerCommand::parse(" f "), RunnerCommand::Finish);
        assert_eq!(RunnerCommand::parse("q"), RunnerCommand::Quit);
        assert_eq!(RunnerCommand::parse(""), RunnerCommand::Empty);
        assert_eq!(RunnerCommand::parse("0"), RunnerCommand::Unknown("0".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_choice_keeps_running() {
        let mut runner = runner().await;
        let step = runner.dispatch(RunnerCommand::Select(4)).await.unwrap();
        assert!(matches!(step, Step::Continue));
        assert!(runner.controller().responses().is_empty());
    }

    #[tokio::test]
    async fn test_declined_finish_continues() {
        let mut runner = runner().await;
        runner.dispatch(RunnerCommand::Select(1)).await.unwrap();
        let step = runner.dispatch(RunnerCommand::Finish).await.unwrap();
        assert!(matches!(step, Step::Continue));
        assert_eq!(runner.controller().phase(), AssessmentPhase::InProgress);
    }

    #[tokio::test]
    async fn test_summary_then_review() {
        let mut runner = runner().await;
        runner.dispatch(RunnerCommand::Next).await.unwrap();
        runner.dispatch(RunnerCommand::Next).await.unwrap();
        assert_eq!(runner.controller().phase(), AssessmentPhase::CompletionReview);

        runner.dispatch(RunnerCommand::Select(1)).await.unwrap();
        assert!(runner.controller().responses().is_empty());

        runner.dispatch(RunnerCommand::Review).await.unwrap();
        assert_eq!(runner.controller().current_index(), 0);
    }

    #[tokio::test]
    async fn test_quit_stops() {
        let mut runner = runner().await;
        let step = runner.dispatch(RunnerCommand::Quit).await.unwrap();
        assert!(matches!(step, Step::Stop(RunOutcome::Quit)));
    }
}
