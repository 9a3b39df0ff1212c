//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for compass
#[derive(Parser, Debug)]
#[command(name = "compass")]
#[command(author, version, about = "Terminal client for the career guidance assistant")]
#[command(long_about = r#"
Compass talks to a career-guidance backend from the terminal: chat with the
AI coach, or take the personality assessment one question at a time.

Configuration files are loaded from (in priority order):
1. COMPASS_* environment variables (e.g. COMPASS_SERVER__BASE_URL)
2. --config <path>     Explicit config file
3. ./compass.toml      Project-level config
4. ~/.config/compass/config.toml   Global config

Example:
  compass chat
  compass ask "Which careers suit an INFJ?"
  compass --base-url https://careers.example.edu assess
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Backend origin, overriding `server.base_url`
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Write diagnostic logs to daily files in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive chat with the AI coach
    Chat {
        /// Also write the conversation as HTML to this file
        #[arg(long, value_name = "PATH")]
        html_transcript: Option<PathBuf>,
    },

    /// Send a single message and print the reply
    Ask {
        /// The message to send
        message: String,
    },

    /// Take the personality assessment
    Assess {
        /// Finish without asking when fewer answers than required are given
        #[arg(short, long)]
        yes: bool,
    },
}
