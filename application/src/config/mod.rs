//! Application-level configuration.
//!
//! - [`Endpoints`] — backend paths the controllers call
//! - [`AssessmentParams`] — thresholds and save-retry policy for the quiz flow

pub mod assessment_params;
pub mod endpoints;

pub use assessment_params::AssessmentParams;
pub use endpoints::Endpoints;
