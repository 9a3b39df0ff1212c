//! Progress and navigation derived from the attempt's position

/// Snapshot of how far through the questions the user is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    pub current_index: usize,
}

impl Progress {
    pub fn new(answered: usize, total: usize, current_index: usize) -> Self {
        Self {
            answered,
            total,
            current_index,
        }
    }

    /// Share of questions answered, rounded to the nearest whole percent
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let ratio = (self.answered as f64 / self.total as f64) * 100.0;
        ratio.round().clamp(0.0, 100.0) as u8
    }

    /// "Question i of N", or `None` before any questions exist
    pub fn counter_label(&self) -> Option<String> {
        (self.total > 0).then(|| format!("Question {} of {}", self.current_index + 1, self.total))
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.answered >= self.total
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }
}

/// Which navigation controls are available for the current question.
///
/// Always derived fresh from index and counts; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub previous_enabled: bool,
    pub next_visible: bool,
    pub finish_visible: bool,
    pub finish_enabled: bool,
}

impl Navigation {
    pub fn derive(progress: &Progress) -> Self {
        let is_last = progress.total > 0 && progress.current_index + 1 == progress.total;
        Self {
            previous_enabled: progress.current_index > 0,
            next_visible: !is_last,
            finish_visible: is_last,
            finish_enabled: is_last && progress.is_complete(),
        }
    }
}
