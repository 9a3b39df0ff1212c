//! Interactive assessment module
//!
//! Terminal renderer, stdin confirmation and the command loop that drives
//! the assessment controller.

mod confirmation;
mod renderer;
mod runner;

pub use confirmation::InteractiveConfirmation;
pub use renderer::TerminalAssessmentRenderer;
pub use runner::{AssessmentRunner, RunOutcome, RunnerCommand, Step};
