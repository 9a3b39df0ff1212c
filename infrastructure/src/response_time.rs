//! Synthetic per-answer response times.

use compass_application::ports::response_time::ResponseTimeSource;
use rand::Rng;
use std::ops::RangeInclusive;

/// Uniformly random response time in whole seconds, 1 to 10 by default
#[derive(Debug, Clone)]
pub struct RandomResponseTime {
    range: RangeInclusive<u32>,
}

impl RandomResponseTime {
    pub fn new() -> Self {
        Self { range: 1..=10 }
    }

    /// Custom bounds; an empty range collapses to its start
    pub fn with_range(range: RangeInclusive<u32>) -> Self {
        if range.is_empty() {
            let start = *range.start();
            return Self {
                range: start..=start,
            };
        }
        Self { range }
    }
}

impl Default for RandomResponseTime {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseTimeSource for RandomResponseTime {
    fn next_response_time(&self) -> u32 {
        rand::rng().random_range(self.range.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range() {
        let source = RandomResponseTime::new();
        for _ in 0..200 {
            let t = source.next_response_time();
            assert!((1..=10).contains(&t));
        }
    }

    #[test]
    fn test_empty_range_collapses() {
        #[allow(clippy::reversed_empty_ranges)]
        let source = RandomResponseTime::with_range(5..=2);
        assert_eq!(source.next_response_time(), 5);
    }
}
