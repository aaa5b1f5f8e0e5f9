//! Utility modules shared across the crate
//!
//! - **error**: the crate error type and `Result` alias
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

use std::any::Any;
use std::time::Duration;

/// Render a caught panic payload as text
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Milliseconds in a duration, saturating at `u64::MAX`
pub(crate) fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
