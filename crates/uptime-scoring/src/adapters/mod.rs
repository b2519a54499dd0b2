//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the `QueryService` outbound port.

mod memory;
mod snapshot;

pub use memory::InMemoryQueryService;
pub use snapshot::{Snapshot, SnapshotQueryService};
