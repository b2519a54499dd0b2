//! # Shared Types Crate
//!
//! Records produced by the chain indexer and consumed read-only by the
//! scoring workspace.
//!
//! ## Design Principles
//!
//! - **Read-only**: nothing in the workspace creates or mutates these records;
//!   they only flow out of a query service.
//! - **Indexer field names**: serde renames follow the indexer's document
//!   layout so snapshot exports deserialize without a mapping layer.

pub mod entities;

pub use entities::*;
