//! Confirmation port for interactive yes/no decisions.
//!
//! Used before finishing an assessment with too few answers.
//!
//! # Built-in Implementations
//!
//! - [`AutoConfirm`] - Always proceeds
//! - [`AutoDecline`] - Always declines
//!
//! For interactive use, see `InteractiveConfirmation` in the presentation layer.

use async_trait::async_trait;
use thiserror::Error;

/// Failure to obtain a decision (not a "no" answer)
#[derive(Error, Debug, Clone)]
pub enum ConfirmationError {
    #[error("Operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(String),
}

#[async_trait]
pub trait ConfirmationPort: Send + Sync {
    /// Ask the user `prompt`; `Ok(true)` means proceed
    async fn confirm(&self, prompt: &str) -> Result<bool, ConfirmationError>;
}

/// Always proceeds without asking
pub struct AutoConfirm;

#[async_trait]
impl ConfirmationPort for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> Result<bool, ConfirmationError> {
        Ok(true)
    }
}

/// Always declines without asking
pub struct AutoDecline;

#[async_trait]
impl ConfirmationPort for AutoDecline {
    async fn confirm(&self, _prompt: &str) -> Result<bool, ConfirmationError> {
        Ok(false)
    }
}
