//! Renderer ports
//!
//! Controllers push display updates through these traits. Implementations
//! live in the presentation layer (terminal, HTML transcript) and in tests.

use crate::use_cases::save_queue::SaveStatus;
use compass_domain::{AssessmentResult, ChoiceId, Message, Navigation, Progress, Question};

/// Display surface for the chat flow
pub trait ChatRenderer: Send + Sync {
    /// Add a message to the end of the visible message list
    fn append_message(&self, message: &Message);

    /// Show the transient "assistant is typing" indicator
    fn show_typing(&self);

    /// Remove the typing indicator if it is showing
    fn remove_typing(&self);

    /// Clear whatever input control the message came from
    fn clear_input(&self) {}

    /// Move the message list's viewport to the newest message
    fn scroll_to_bottom(&self) {}
}

/// Everything needed to draw one question
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    pub question: &'a Question,
    /// Choice already recorded for this question, to highlight
    pub selected: Option<ChoiceId>,
    pub index: usize,
    pub total: usize,
}

/// Display surface for the assessment flow
pub trait AssessmentRenderer: Send + Sync {
    fn show_loading(&self, message: &str);

    fn hide_loading(&self);

    /// Draw the question text and one row per choice
    fn show_question(&self, view: &QuestionView<'_>);

    fn show_progress(&self, progress: &Progress);

    fn show_navigation(&self, navigation: &Navigation);

    /// Shown after advancing past the last question
    fn show_completion_summary(&self, progress: &Progress);

    /// Report answers that could not be saved (or that have since been saved)
    fn show_save_status(&self, _status: &SaveStatus) {}

    /// Terminal error view; the only recovery offered is starting over
    fn show_error(&self, message: &str);

    /// Send the user to `path`; `result` is the decoded completion payload when available
    fn redirect(&self, path: &str, result: Option<&AssessmentResult>);
}
