//! Presentation-level configuration
//!
//! Configuration for terminal colors and REPL behavior.

use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl OutputConfig {
    /// Apply the color preference process-wide
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Default)]
pub struct ReplConfig {
    /// Path to history file; `~/` is expanded
    pub history_file: Option<String>,
}

impl ReplConfig {
    /// Resolved history path, defaulting to the platform data directory
    pub fn history_path(&self) -> Option<PathBuf> {
        match self.history_file.as_deref() {
            Some(path) => Some(expand_home(path)),
            None => dirs::data_dir().map(|d| d.join("compass").join("history.txt")),
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
