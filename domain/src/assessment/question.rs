//! Question and answer-choice value objects

use serde::{Deserialize, Serialize};

/// Server-assigned question identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub i64);

/// Server-assigned answer-choice identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(pub i64);

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One selectable answer for a question.
///
/// `value` is the scoring weight the server uses; the client only displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub text: String,
    pub value: i64,
}

impl Choice {
    /// Signed weight label, e.g. `+2`, `-1`, `0`
    pub fn value_label(&self) -> String {
        if self.value > 0 {
            format!("+{}", self.value)
        } else {
            self.value.to_string()
        }
    }
}

/// A question as served by the questions endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }

    /// Look up a choice by its 1-based display position
    pub fn choice_at(&self, position: usize) -> Option<&Choice> {
        position.checked_sub(1).and_then(|i| self.choices.get(i))
    }

    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }
}
