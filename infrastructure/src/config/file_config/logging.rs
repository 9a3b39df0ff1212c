//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily-rotated diagnostic logs; stderr when unset
    pub dir: Option<String>,
    /// JSONL transcript of chat messages and assessment events
    pub transcript: Option<String>,
}
