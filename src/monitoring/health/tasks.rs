//! Background health check schedule

use super::monitor::HealthMonitor;
use crate::utils::duration_millis;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Shortest interval the schedule accepts
const MIN_INTERVAL: Duration = Duration::from_millis(10);

impl HealthMonitor {
    /// Start periodic checks.
    ///
    /// The first cycle runs immediately. A cycle is always awaited before the next
    /// tick; ticks missed while a cycle was running are skipped. Starting again
    /// replaces the running schedule.
    pub fn start(self: &Arc<Self>, interval: Duration) {
        let interval = interval.max(MIN_INTERVAL);
        let monitor = Arc::downgrade(self);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let Some(monitor) = monitor.upgrade() else {
                    debug!("Health monitor dropped, stopping schedule");
                    break;
                };
                monitor.run_checks().await;
            }
        });

        if let Some(previous) = self.schedule.lock().replace(handle) {
            previous.abort();
        }

        info!(
            interval_ms = duration_millis(interval),
            probes = self.probe_count(),
            "Health monitor started"
        );
    }

    /// Stop periodic checks. Records and listeners are kept.
    pub fn stop(&self) {
        if let Some(handle) = self.schedule.lock().take() {
            handle.abort();
            info!("Health monitor stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.schedule
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        if let Some(handle) = self.schedule.get_mut().take() {
            handle.abort();
        }
    }
}
