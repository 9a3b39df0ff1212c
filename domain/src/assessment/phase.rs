//! Lifecycle of one assessment attempt

/// Where an attempt currently is.
///
/// ```text
/// Loading → InProgress ⇄ CompletionReview → Submitting → Done
///    ↓                                          ↓
///  Error ←──────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentPhase {
    Loading,
    InProgress,
    CompletionReview,
    Submitting,
    Done,
    Error,
}

impl AssessmentPhase {
    /// Whether question navigation may be offered in this phase
    pub fn allows_navigation(&self) -> bool {
        matches!(
            self,
            AssessmentPhase::InProgress | AssessmentPhase::CompletionReview
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AssessmentPhase::Done | AssessmentPhase::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentPhase::Loading => "loading",
            AssessmentPhase::InProgress => "in-progress",
            AssessmentPhase::CompletionReview => "completion-review",
            AssessmentPhase::Submitting => "submitting",
            AssessmentPhase::Done => "done",
            AssessmentPhase::Error => "error",
        }
    }
}

impl std::fmt::Display for AssessmentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
