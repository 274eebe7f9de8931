//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: the tool gateway (registry, dispatcher, envelope, definitions)
//! - **trello**: the Trello resource adapter the tools call into

pub mod tools;
pub mod trello;
