//! Trello domain module.
//!
//! The Resource Adapter: one operation per Trello REST call, each resolving
//! to an [`AdapterOutcome`](crate::domains::tools::AdapterOutcome).
//!
//! - `api.rs` - the [`TrelloApi`] contract and request models
//! - `client.rs` - the reqwest implementation

mod api;
mod client;

pub use api::{CardChanges, NewBoard, NewCard, TrelloApi};
pub use client::TrelloClient;
