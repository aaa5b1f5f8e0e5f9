//! Fakes shared by the unit tests

use super::alerts::AlertSink;
use super::probe::{Probe, ProbeResult};
use super::types::{Alert, ServiceStatus};
use crate::utils::error::{HealthError, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Probe that replays a scripted list of statuses, repeating the last one
#[derive(Debug)]
pub struct ScriptedProbe {
    name: String,
    script: Mutex<VecDeque<ServiceStatus>>,
    last: Mutex<ServiceStatus>,
    calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn new(name: &str, script: &[ServiceStatus]) -> Self {
        Self {
            name: name.to_string(),
            script: Mutex::new(script.iter().copied().collect()),
            last: Mutex::new(ServiceStatus::Healthy),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Probe for ScriptedProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<ProbeResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let status = match self.script.lock().pop_front() {
            Some(status) => {
                *self.last.lock() = status;
                status
            }
            None => *self.last.lock(),
        };

        let result = match status {
            ServiceStatus::Healthy => ProbeResult::healthy(&self.name).with_message("ok"),
            ServiceStatus::Degraded => ProbeResult::degraded(&self.name, "http 401"),
            ServiceStatus::Down => ProbeResult::down(&self.name, "connection refused"),
        };
        Ok(result.with_latency(Duration::from_millis(12)))
    }
}

/// Probe whose check always returns an error
#[derive(Debug)]
pub struct ErroringProbe(pub &'static str);

#[async_trait::async_trait]
impl Probe for ErroringProbe {
    fn name(&self) -> &str {
        self.0
    }

    async fn check(&self) -> Result<ProbeResult> {
        Err(HealthError::probe("dns lookup failed"))
    }
}

/// Probe whose check panics
#[derive(Debug)]
pub struct PanickingProbe(pub &'static str);

#[async_trait::async_trait]
impl Probe for PanickingProbe {
    fn name(&self) -> &str {
        self.0
    }

    async fn check(&self) -> Result<ProbeResult> {
        panic!("probe blew up");
    }
}

/// Probe that sleeps longer than any reasonable deadline
#[derive(Debug)]
pub struct StuckProbe(pub &'static str);

#[async_trait::async_trait]
impl Probe for StuckProbe {
    fn name(&self) -> &str {
        self.0
    }

    async fn check(&self) -> Result<ProbeResult> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(ProbeResult::healthy(self.0))
    }
}

/// Sink that keeps every alert it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingSink {
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().clone()
    }
}

#[async_trait::async_trait]
impl AlertSink for RecordingSink {
    async fn send(&self, alert: &Alert) -> Result<()> {
        self.alerts.lock().push(alert.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Sink that always fails
#[derive(Debug, Default)]
pub struct FailingSink;

#[async_trait::async_trait]
impl AlertSink for FailingSink {
    async fn send(&self, _alert: &Alert) -> Result<()> {
        Err(HealthError::sink("webhook unreachable"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}
