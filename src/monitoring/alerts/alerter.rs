//! Alerter implementation

use super::sinks::{AlertSink, EventStoreSink, SlackSink};
use super::types::AlertStats;
use crate::config::AlertingConfig;
use crate::monitoring::types::Alert;
use crate::utils::panic_message;
use futures::FutureExt;
use futures::future::join_all;
use parking_lot::{Mutex, RwLock};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Fans alerts out to every sink
#[derive(Debug, Default)]
pub struct Alerter {
    sinks: Vec<Arc<dyn AlertSink>>,
    stats: RwLock<AlertStats>,
    /// Deliveries started by [`Alerter::dispatch`] that may still be running
    in_flight: Mutex<Vec<JoinHandle<()>>>,
    /// Runtime used by [`Alerter::dispatch`] when called from a plain thread
    runtime: Option<Handle>,
}

impl Alerter {
    /// Create an alerter without sinks.
    ///
    /// When built inside a tokio runtime the alerter keeps a handle to it, so
    /// alerts raised later from outside the runtime are still delivered.
    pub fn new() -> Self {
        Self {
            runtime: Handle::try_current().ok(),
            ..Self::default()
        }
    }

    /// Runtime that delivers alerts dispatched outside any runtime
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Build the Slack and event store sinks from configuration. A sink with no
    /// endpoint configured stays registered and does nothing.
    pub fn from_config(config: &AlertingConfig) -> Self {
        let timeout = Duration::from_millis(config.sink_timeout_ms);

        let slack = SlackSink::new(config.slack_webhook.clone())
            .with_min_severity(config.slack_min_severity)
            .with_timeout(timeout);
        let event_store = EventStoreSink::new(
            config.event_store.url.clone(),
            config.event_store.api_key.clone(),
        )
        .with_table(config.event_store.table.clone())
        .with_timeout(timeout);

        Self::new()
            .with_sink(Arc::new(event_store))
            .with_sink(Arc::new(slack))
    }

    pub fn with_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|sink| sink.name()).collect()
    }

    /// Deliver an alert to every interested sink and wait for all of them.
    ///
    /// Never fails: a sink error or panic is logged and counted.
    pub async fn send_alert(&self, alert: Alert) -> Alert {
        debug!(
            alert_id = %alert.id,
            severity = %alert.severity,
            source = alert.source(),
            "Sending alert"
        );
        self.stats.write().record(&alert);

        let deliveries = self
            .sinks
            .iter()
            .filter(|sink| sink.supports_severity(alert.severity))
            .map(|sink| {
                let alert = &alert;
                async move {
                    let outcome = AssertUnwindSafe(sink.send(alert)).catch_unwind().await;
                    (sink.name(), outcome)
                }
            });

        let mut failed = 0;
        for (sink, outcome) in join_all(deliveries).await {
            let error = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(panic) => format!("sink panicked: {}", panic_message(panic.as_ref())),
            };
            failed += 1;
            warn!(sink, alert_id = %alert.id, error = %error, "Alert sink failed");
        }

        if failed > 0 {
            self.stats.write().failed_deliveries += failed;
        }

        alert
    }

    /// Send an alert in the background.
    ///
    /// Uses the current runtime, else the one captured at construction. With
    /// neither the alert is dropped with a warning and `false` is returned.
    pub fn dispatch(self: &Arc<Self>, alert: Alert) -> bool {
        let Some(handle) = Handle::try_current().ok().or_else(|| self.runtime.clone()) else {
            warn!(alert_id = %alert.id, "No async runtime, dropping alert");
            return false;
        };

        let alerter = Arc::clone(self);
        let task = handle.spawn(async move {
            alerter.send_alert(alert).await;
        });

        let mut in_flight = self.in_flight.lock();
        in_flight.retain(|task| !task.is_finished());
        in_flight.push(task);
        true
    }

    /// Wait for every dispatched alert to settle
    pub async fn flush(&self) {
        loop {
            let pending = std::mem::take(&mut *self.in_flight.lock());
            if pending.is_empty() {
                break;
            }
            for task in pending {
                if let Err(e) = task.await {
                    warn!(error = %e, "Alert delivery task failed");
                }
            }
        }
    }

    pub fn stats(&self) -> AlertStats {
        self.stats.read().clone()
    }
}
