//! Error handling for the health pipeline
//!
//! This module defines the error type used at the edges of the crate: configuration
//! loading, probe implementations and alert sink delivery.

mod helpers;
mod types;

pub use types::{HealthError, Result};
