//! # healthwatch
//!
//! In-process health monitoring for the external dependencies of a service.
//!
//! ## Features
//!
//! - **Pluggable probes**: one [`Probe`] per dependency, with an HTTP probe built in
//! - **Health monitor**: concurrent check cycles, per-service history and uptime
//! - **Edge-triggered alerts**: one alert per status transition, never per cycle
//! - **Heartbeat tracking**: one alert per streak of missed heartbeats
//! - **Alert fan-out**: Slack webhook and event store sinks, best-effort delivery
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use healthwatch::{Alerter, HealthMonitor, HeartbeatTracker, HttpProbe, Probe};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let alerter = Arc::new(Alerter::new());
//!     let heartbeat = Arc::new(HeartbeatTracker::new(alerter.clone()));
//!     let probes: Vec<Arc<dyn Probe>> = vec![Arc::new(HttpProbe::new(
//!         "database",
//!         "https://db.example.com/health",
//!     ))];
//!
//!     let monitor = Arc::new(HealthMonitor::new(probes, alerter, heartbeat));
//!     let _subscription = monitor.on_change(|snapshot| {
//!         println!("overall: {}", snapshot.overall_status);
//!     });
//!     monitor.start(Duration::from_secs(60));
//! }
//! ```
//!
//! ## From configuration
//!
//! ```rust,no_run
//! use healthwatch::{Config, MonitoringSystem};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/healthwatch.yaml").await?;
//!     let system = MonitoringSystem::from_config(&config)?;
//!     let snapshot = system.run_once().await;
//!     println!("{}", serde_json::to_string_pretty(&snapshot)?);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod monitoring;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{HealthError, Result};

pub use monitoring::{
    Alert, AlertKind, AlertSeverity, AlertSink, AlertStats, Alerter, Clock, EventStoreSink,
    HealthMonitor, HealthMonitorConfig, HealthSnapshot, HeartbeatEmitter, HeartbeatStats,
    HeartbeatTracker, HttpProbe, ManualClock, MonitoringSystem, OverallStatus, Probe,
    ProbeOutcome, ProbeResult, ServiceStatus, ServiceSummary, SlackSink, Subscription,
    SystemClock,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
