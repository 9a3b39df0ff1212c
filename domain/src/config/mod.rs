//! Configuration-related domain types

pub mod validation;
