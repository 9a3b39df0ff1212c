//! Core domain concepts shared by the chat and assessment subdomains.
//!
//! - [`error::DomainError`] — validation failures raised by domain entities
//! - [`string`] — text escaping for the HTML and terminal surfaces

pub mod error;
pub mod string;
