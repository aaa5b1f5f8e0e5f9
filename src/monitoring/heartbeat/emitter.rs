//! Periodic heartbeat sender

use super::tracker::HeartbeatTracker;
use crate::utils::duration_millis;
use crate::utils::error::{HealthError, Result};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Posts a heartbeat event on an interval and reports each outcome to a
/// [`HeartbeatTracker`]
#[derive(Debug)]
pub struct HeartbeatEmitter {
    url: String,
    tracker: Arc<HeartbeatTracker>,
    client: reqwest::Client,
    timeout: Duration,
    schedule: Mutex<Option<JoinHandle<()>>>,
}

impl HeartbeatEmitter {
    pub fn new(url: impl Into<String>, tracker: Arc<HeartbeatTracker>) -> Self {
        Self {
            url: url.into(),
            tracker,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(10),
            schedule: Mutex::new(None),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one heartbeat and record the outcome.
    ///
    /// Returns the measured latency on success. The error is returned for the
    /// caller's information only; it has already been recorded.
    pub async fn beat(&self) -> Result<Duration> {
        let started = Instant::now();

        match self.send().await {
            Ok(()) => {
                let latency = started.elapsed();
                debug!(url = %self.url, latency_ms = duration_millis(latency), "Heartbeat sent");
                self.tracker.record_success(Some(latency));
                Ok(latency)
            }
            Err(e) => {
                self.tracker.record_failure(&e);
                Err(e)
            }
        }
    }

    async fn send(&self) -> Result<()> {
        let payload = json!({
            "type": "heartbeat",
            "source": self.tracker.source(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "status": "active",
        });

        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(HealthError::sink(format!(
                "heartbeat endpoint returned http {}",
                response.status().as_u16()
            )))
        }
    }

    /// Start sending heartbeats. The first one is sent immediately; starting
    /// again replaces the running schedule.
    pub fn start(self: &Arc<Self>, interval: Duration) {
        let interval = interval.max(Duration::from_millis(10));
        let emitter = Arc::downgrade(self);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let Some(emitter) = emitter.upgrade() else {
                    break;
                };
                let _ = emitter.beat().await;
            }
        });

        if let Some(previous) = self.schedule.lock().replace(handle) {
            previous.abort();
        }

        info!(url = %self.url, interval_ms = duration_millis(interval), "Heartbeat emitter started");
    }

    pub fn stop(&self) {
        if let Some(handle) = self.schedule.lock().take() {
            handle.abort();
            info!("Heartbeat emitter stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.schedule
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for HeartbeatEmitter {
    fn drop(&mut self) {
        if let Some(handle) = self.schedule.get_mut().take() {
            handle.abort();
        }
    }
}
