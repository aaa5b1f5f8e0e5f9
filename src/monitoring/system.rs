//! Wiring of the monitoring components

use crate::config::Config;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use super::alerts::Alerter;
use super::health::{HealthMonitor, HealthMonitorConfig, HealthSnapshot};
use super::heartbeat::{HeartbeatEmitter, HeartbeatTracker};
use super::probe::{HttpProbe, Probe};

/// One alerter, one heartbeat tracker and one health monitor, built from
/// configuration and sharing state through `Arc`
#[derive(Debug, Clone)]
pub struct MonitoringSystem {
    pub(super) config: Arc<Config>,
    pub(super) alerter: Arc<Alerter>,
    pub(super) heartbeat: Arc<HeartbeatTracker>,
    pub(super) monitor: Arc<HealthMonitor>,
    /// Present when a heartbeat URL is configured
    pub(super) emitter: Option<Arc<HeartbeatEmitter>>,
    pub(super) start_time: Instant,
}

impl MonitoringSystem {
    /// Build the system with one HTTP probe per configured probe
    pub fn from_config(config: &Config) -> Result<Self> {
        let default_timeout = config.monitor.probe_timeout();
        let probes: Vec<Arc<dyn Probe>> = config
            .probes
            .iter()
            .map(|probe| Arc::new(HttpProbe::from_config(probe, default_timeout)) as Arc<dyn Probe>)
            .collect();

        Self::with_probes(config, probes)
    }

    /// Build the system around caller-supplied probes
    pub fn with_probes(config: &Config, probes: Vec<Arc<dyn Probe>>) -> Result<Self> {
        config.validate()?;
        info!(probes = probes.len(), "Initializing monitoring system");

        let config = Arc::new(config.clone());
        let alerter = Arc::new(Alerter::from_config(&config.alerting));

        let heartbeat = Arc::new(
            HeartbeatTracker::new(alerter.clone())
                .with_failure_threshold(config.heartbeat.failure_threshold)
                .with_source(config.heartbeat.source.clone()),
        );

        let monitor = Arc::new(
            HealthMonitor::new(probes, alerter.clone(), heartbeat.clone()).with_config(
                HealthMonitorConfig {
                    probe_timeout: config.monitor.probe_timeout(),
                },
            ),
        );

        let emitter = config.heartbeat.url.as_ref().map(|url| {
            Arc::new(
                HeartbeatEmitter::new(url.clone(), heartbeat.clone())
                    .with_timeout(config.monitor.probe_timeout()),
            )
        });

        Ok(Self {
            config,
            alerter,
            heartbeat,
            monitor,
            emitter,
            start_time: Instant::now(),
        })
    }

    /// Start the check schedule and, if configured, the heartbeat emitter
    pub fn start(&self) {
        info!("Starting monitoring system");
        self.monitor.start(self.config.monitor.interval());
        if let Some(emitter) = &self.emitter {
            emitter.start(self.config.heartbeat.interval());
        }
    }

    /// Stop every schedule and wait for in-flight alerts
    pub async fn stop(&self) {
        info!("Stopping monitoring system");
        self.monitor.stop();
        if let Some(emitter) = &self.emitter {
            emitter.stop();
        }
        self.alerter.flush().await;
        info!(uptime_secs = self.start_time.elapsed().as_secs(), "Monitoring system stopped");
    }

    /// Run one check cycle and wait for the alerts it raised
    pub async fn run_once(&self) -> HealthSnapshot {
        if let Some(emitter) = &self.emitter {
            let _ = emitter.beat().await;
        }
        let snapshot = self.monitor.run_checks().await;
        self.alerter.flush().await;
        snapshot
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn alerter(&self) -> &Arc<Alerter> {
        &self.alerter
    }

    pub fn heartbeat(&self) -> &Arc<HeartbeatTracker> {
        &self.heartbeat
    }

    pub fn monitor(&self) -> &Arc<HealthMonitor> {
        &self.monitor
    }

    pub fn emitter(&self) -> Option<&Arc<HeartbeatEmitter>> {
        self.emitter.as_ref()
    }
}
