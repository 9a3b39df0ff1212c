//! Chat configuration from TOML (`[chat]` section)

use serde::{Deserialize, Serialize};

/// Raw chat settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Canned prompts offered by `/quick` and sent with `/N`
    pub quick_questions: Vec<String>,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            quick_questions: vec![
                "What careers suit my personality type?".to_string(),
                "How can I improve my study habits?".to_string(),
                "Which skills should I develop next?".to_string(),
                "How do I prepare for an interview?".to_string(),
            ],
        }
    }
}
