//! Error handling and lookup statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, HTTP lookups, and the tracker pipeline
//! - Thread-safe counters of successes and failures per kind

mod stats;
mod types;

// Re-export public API
pub use stats::LookupStats;
pub use types::{FailureKind, InitializationError, LookupError, TrackerError};
