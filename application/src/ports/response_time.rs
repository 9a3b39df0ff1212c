//! Source of the `response_time` value attached to each saved answer.
//!
//! The server only stores it for analytics.

/// Produces a response time in whole seconds for one answer
pub trait ResponseTimeSource: Send + Sync {
    fn next_response_time(&self) -> u32;
}

/// Always reports the same value
pub struct FixedResponseTime(pub u32);

impl ResponseTimeSource for FixedResponseTime {
    fn next_response_time(&self) -> u32 {
        self.0
    }
}
