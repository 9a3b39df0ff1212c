//! Domain error types

use crate::assessment::question::{ChoiceId, QuestionId};
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("No questions available")]
    NoQuestions,

    #[error("Invalid question index: {index} (have {len} questions)")]
    QuestionIndexOutOfRange { index: usize, len: usize },

    #[error("Unknown question: {0}")]
    UnknownQuestion(QuestionId),

    #[error("Choice {choice} does not belong to question {question}")]
    UnknownChoice {
        question: QuestionId,
        choice: ChoiceId,
    },
}

impl DomainError {
    /// Check if this error was caused by user input rather than data from the server
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyMessage | DomainError::QuestionIndexOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_display() {
        let error = DomainError::QuestionIndexOutOfRange { index: 7, len: 3 };
        assert_eq!(
            error.to_string(),
            "Invalid question index: 7 (have 3 questions)"
        );
    }

    #[test]
    fn test_is_user_input() {
        assert!(DomainError::EmptyMessage.is_user_input());
        assert!(DomainError::QuestionIndexOutOfRange { index: 1, len: 0 }.is_user_input());
        assert!(!DomainError::NoQuestions.is_user_input());
        assert!(!DomainError::UnknownQuestion(QuestionId(4)).is_user_input());
    }
}
