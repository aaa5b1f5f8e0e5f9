//! Probe contract
//!
//! A probe performs one health check against one dependency. Implementations must
//! bound their own I/O; the monitor additionally wraps every call with
//! [`run_guarded`] so that an error, a panic or an overrun still yields a `down`
//! result instead of leaving the slot unreported.

mod http;
mod runner;
mod types;


pub use http::HttpProbe;
pub use runner::run_guarded;
pub use types::{ProbeOutcome, ProbeResult};
pub(crate) use types::millis as millis_serde;

use crate::utils::error::Result;

/// A single-dependency health check
#[async_trait::async_trait]
pub trait Probe: Send + Sync + std::fmt::Debug {
    /// Stable name of the dependency this probe checks
    fn name(&self) -> &str;

    /// Perform one health check.
    ///
    /// No retries happen inside a single invocation; the next scheduled cycle is the
    /// retry. An `Err` is folded in as a `down` result carrying the error text.
    async fn check(&self) -> Result<ProbeResult>;
}
