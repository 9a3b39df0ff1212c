//! Assessment subdomain: questions, answers, sessions and progress.
//!
//! The scoring model lives on the server; everything here is the client's
//! view of one assessment attempt.

pub mod phase;
pub mod progress;
pub mod question;
pub mod responses;
pub mod result;
pub mod session;
