//! Chain relay client.
//!
//! The relay is an external collaborator that constructs, signs, and submits
//! move-calls to the network. This crate only builds the call descriptions
//! and reports whether the relay accepted them; retry and reconciliation
//! semantics belong to the frontend, not this service.

pub mod client;
pub mod types;

pub use client::ChainClient;
pub use types::{ChainError, MoveCall, TransactionResult};
