//! Health snapshot types handed to readers and listeners

use super::record::ServiceHealthRecord;
use crate::monitoring::heartbeat::HeartbeatStats;
use crate::monitoring::probe::ProbeResult;
use crate::monitoring::types::{OverallStatus, ServiceStatus};
use serde::Serialize;
use std::time::Duration;

/// Read-only summary of one service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    /// Service name
    pub name: String,
    /// Current status
    pub status: ServiceStatus,
    /// Latency of the last check
    #[serde(rename = "latency_ms", with = "crate::monitoring::probe::millis_serde")]
    pub latency: Option<Duration>,
    /// Last check timestamp
    pub last_checked: chrono::DateTime<chrono::Utc>,
    /// Message of the last check, if any
    pub message: Option<String>,
    /// Error of the last check, if any
    pub error: Option<String>,
    /// Healthy checks over all checks
    pub uptime: f64,
    /// Down checks over all checks
    pub error_rate: f64,
    /// Total checks recorded
    pub checks: u64,
    /// Recent results, newest first
    pub history: Vec<ProbeResult>,
}

impl From<&ServiceHealthRecord> for ServiceSummary {
    fn from(record: &ServiceHealthRecord) -> Self {
        Self {
            name: record.name.clone(),
            status: record.status,
            latency: record.latency,
            last_checked: record.last_checked,
            message: record.message.clone(),
            error: record.error.clone(),
            uptime: record.uptime(),
            error_rate: record.error_rate(),
            checks: record.total_checks(),
            history: record.history.iter().cloned().collect(),
        }
    }
}

/// Aggregate status of every service plus the heartbeat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthSnapshot {
    /// Worst-case status across services
    pub overall_status: OverallStatus,
    /// Per-service summaries, ordered by name
    pub services: Vec<ServiceSummary>,
    /// Heartbeat tracker state
    pub heartbeat: HeartbeatStats,
    /// Completion time of the last check cycle, or the read time before any cycle
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl HealthSnapshot {
    pub fn service(&self, name: &str) -> Option<&ServiceSummary> {
        self.services.iter().find(|service| service.name == name)
    }

    /// Services that are currently not healthy
    pub fn unhealthy_services(&self) -> impl Iterator<Item = &ServiceSummary> {
        self.services
            .iter()
            .filter(|service| !service.status.is_healthy())
    }
}
