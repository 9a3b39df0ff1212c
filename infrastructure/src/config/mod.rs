//! Configuration file loading for compass
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COMPASS_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./compass.toml` or `./.compass.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/compass/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAssessmentConfig, FileChatConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
