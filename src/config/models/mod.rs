//! Configuration data models
//!
//! This module defines all configuration structures used by the health pipeline.

#![allow(missing_docs)]

pub mod alerting;
pub mod heartbeat;
pub mod logging;
pub mod monitor;
pub mod probe;

// Re-export all configuration types
pub use alerting::*;
pub use heartbeat::*;
pub use logging::*;
pub use monitor::*;
pub use probe::*;

/// Default check interval in seconds
pub fn default_interval_secs() -> u64 {
    60
}

/// Default per-request timeout in milliseconds
pub fn default_timeout_ms() -> u64 {
    10_000
}
