//! Local record of answers given during an attempt

use super::question::{ChoiceId, QuestionId};
use std::collections::HashMap;

/// Question → chosen answer, one entry per answered question.
///
/// This is the client's cache for progress and highlighting; the server
/// holds the authoritative copy.
#[derive(Debug, Clone, Default)]
pub struct ResponseMap {
    answers: HashMap<QuestionId, ChoiceId>,
}

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the choice it replaced (if any)
    pub fn record(&mut self, question: QuestionId, choice: ChoiceId) -> Option<ChoiceId> {
        self.answers.insert(question, choice)
    }

    pub fn get(&self, question: QuestionId) -> Option<ChoiceId> {
        self.answers.get(&question).copied()
    }

    pub fn is_answered(&self, question: QuestionId) -> bool {
        self.answers.contains_key(&question)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, ChoiceId)> + '_ {
        self.answers.iter().map(|(q, c)| (*q, *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reanswer_replaces_entry() {
        let mut map = ResponseMap::new();
        assert_eq!(map.record(QuestionId(1), ChoiceId(10)), None);
        assert_eq!(map.record(QuestionId(1), ChoiceId(11)), Some(ChoiceId(10)));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(QuestionId(1)), Some(ChoiceId(11)));
    }

    #[test]
    fn test_counts_distinct_questions() {
        let mut map = ResponseMap::new();
        map.record(QuestionId(1), ChoiceId(10));
        map.record(QuestionId(2), ChoiceId(20));
        assert_eq!(map.len(), 2);
        assert!(map.is_answered(QuestionId(2)));
        assert!(!map.is_answered(QuestionId(3)));
    }
}
