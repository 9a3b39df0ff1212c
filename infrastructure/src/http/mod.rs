//! HTTP adapter for the [`Transport`](compass_application::Transport) port.

mod client;
pub mod csrf;

pub use client::{HttpSettings, HttpTransport};
pub use csrf::{CsrfLookup, CsrfSource, CsrfToken};
