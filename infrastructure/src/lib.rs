//! Infrastructure layer for compass
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;
pub mod response_time;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileAssessmentConfig, FileChatConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileReplConfig, FileServerConfig,
};
pub use http::{CsrfLookup, CsrfSource, CsrfToken, HttpSettings, HttpTransport};
pub use logging::JsonlTranscriptLogger;
pub use response_time::RandomResponseTime;
