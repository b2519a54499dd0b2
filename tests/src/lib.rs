//! # Validator Scoring Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs   # Scoring engine against the in-memory store
//!     ├── snapshot.rs    # Snapshot file through the full runtime
//!     └── report.rs      # Table and CSV output
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p uptime-tests
//! cargo test -p uptime-tests integration::scenarios
//! ```
