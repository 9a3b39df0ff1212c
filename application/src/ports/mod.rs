//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod confirmation;
pub mod renderer;
pub mod response_time;
pub mod transcript;
pub mod transport;
