//! Guarded probe invocation

use super::{Probe, ProbeResult};
use crate::monitoring::clock::Clock;
use crate::utils::panic_message;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};
use tracing::warn;

/// Run `probe` with a deadline.
///
/// Always returns a result: an error, a panic or an overrun of `deadline` becomes
/// a `down` result for the probe's service with the failure text in `error`.
pub async fn run_guarded(probe: &dyn Probe, deadline: Duration, clock: &dyn Clock) -> ProbeResult {
    let started = Instant::now();
    let attempt = AssertUnwindSafe(probe.check()).catch_unwind();

    let failure = match tokio::time::timeout(deadline, attempt).await {
        Ok(Ok(Ok(result))) => return result,
        Ok(Ok(Err(e))) => e.to_string(),
        Ok(Err(panic)) => format!("probe panicked: {}", panic_message(panic.as_ref())),
        Err(_) => format!("probe timed out after {}ms", deadline.as_millis()),
    };

    warn!(service = probe.name(), error = %failure, "Probe failed");

    ProbeResult::down(probe.name(), failure)
        .with_latency(started.elapsed())
        .at(clock.now())
}
