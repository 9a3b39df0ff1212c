//! Use cases (application logic)

pub mod assessment;
pub mod chat;
pub mod save_queue;

#[cfg(test)]
pub(crate) mod test_support;
