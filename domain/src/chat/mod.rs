//! Chat subdomain: messages exchanged with the coaching assistant.

pub mod message;
pub mod reply;
