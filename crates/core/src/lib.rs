//! Lumo Core - Domain entities, services, and traits.
//!
//! This crate contains the financial core of the Lumo dashboard: a typed
//! client for the banking sandbox, the category normalizer, the pure
//! aggregation engine that produces the dashboard view-model, and the
//! streak/badge progression tracker over a pluggable state store.

pub mod badges;
pub mod categories;
pub mod client;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod streaks;

// Re-export common types from the client and dashboard modules
pub use client::*;
pub use dashboard::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
