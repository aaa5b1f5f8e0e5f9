//! Common test utilities for healthwatch
//!
//! - Probe fakes with scripted outcomes
//! - An alert sink that records what it receives
//! - Custom assertions

pub mod assertions;
pub mod sinks;

// Re-export commonly used items
pub use probes::{FlakyProbe, ScriptedProbe};
pub use sinks::RecordingSink;

use healthwatch::{Alerter, HealthMonitor, HeartbeatTracker, Probe};
use std::sync::Arc;

/// A monitor wired to a recording sink
pub struct TestPipeline {
    pub monitor: Arc<HealthMonitor>,
    pub heartbeat: Arc<HeartbeatTracker>,
    pub alerter: Arc<Alerter>,
    pub sink: Arc<RecordingSink>,
}

impl TestPipeline {
    pub fn new(probes: Vec<Arc<dyn Probe>>) -> Self {
        let sink = Arc::new(RecordingSink::default());
        let alerter = Arc::new(Alerter::new().with_sink(sink.clone()));
        let heartbeat = Arc::new(HeartbeatTracker::new(alerter.clone()));
        let monitor = Arc::new(HealthMonitor::new(probes, alerter.clone(), heartbeat.clone()));

        Self {
            monitor,
            heartbeat,
            alerter,
            sink,
        }
    }

    /// Run `cycles` check cycles, flushing alerts after each
    pub async fn run_cycles(&self, cycles: usize) {
        for _ in 0..cycles {
            self.monitor.run_checks().await;
            self.alerter.flush().await;
        }
    }
}
