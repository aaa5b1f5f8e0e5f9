//! Health monitoring and alerting
//!
//! Probes check dependencies, the [`HealthMonitor`] folds their results into
//! per-service state, the [`HeartbeatTracker`] records liveness outcomes and the
//! [`Alerter`] fans alerts out to sinks.

// Public submodules
pub mod alerts;
pub mod clock;
pub mod health;
pub mod heartbeat;
pub mod probe;

// Internal submodules
mod system;
mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export public types
pub use alerts::{AlertSink, AlertStats, Alerter, EventStoreSink, SlackSink};
pub use clock::{Clock, ManualClock, SystemClock};
pub use health::{HealthMonitor, HealthMonitorConfig, HealthSnapshot, ServiceSummary, Subscription};
pub use heartbeat::{HeartbeatEmitter, HeartbeatStats, HeartbeatTracker};
pub use probe::{HttpProbe, Probe, ProbeOutcome, ProbeResult};
pub use system::MonitoringSystem;
pub use types::{Alert, AlertKind, AlertSeverity, OverallStatus, ServiceStatus};
