//! Ports module for the scoring engine

pub mod inbound;
pub mod outbound;

pub use inbound::ScoringApi;
pub use outbound::QueryService;
