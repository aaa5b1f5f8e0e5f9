//! Per-service health record

use crate::monitoring::probe::ProbeResult;
use crate::monitoring::types::ServiceStatus;
use std::collections::VecDeque;
use std::time::Duration;

/// Number of probe results kept per service
pub const SERVICE_HISTORY_LIMIT: usize = 20;

/// Health state of one service, created on its first probe result
#[derive(Debug, Clone)]
pub struct ServiceHealthRecord {
    pub name: String,
    pub status: ServiceStatus,
    pub latency: Option<Duration>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub last_checked: chrono::DateTime<chrono::Utc>,
    pub successes: u64,
    pub failures: u64,
    pub degraded: u64,
    /// Most recent results, newest first
    pub history: VecDeque<ProbeResult>,
}

impl ServiceHealthRecord {
    /// Create a record from the first result seen for a service
    pub fn from_result(result: ProbeResult) -> Self {
        let mut record = Self {
            name: result.service.clone(),
            status: result.status(),
            latency: None,
            message: None,
            error: None,
            last_checked: result.timestamp,
            successes: 0,
            failures: 0,
            degraded: 0,
            history: VecDeque::with_capacity(SERVICE_HISTORY_LIMIT),
        };
        record.apply(result);
        record
    }

    /// Fold a result into the record, returning the status it replaced
    pub fn apply(&mut self, result: ProbeResult) -> ServiceStatus {
        let previous = self.status;

        match result.status() {
            ServiceStatus::Healthy => self.successes += 1,
            ServiceStatus::Degraded => self.degraded += 1,
            ServiceStatus::Down => self.failures += 1,
        }

        self.status = result.status();
        self.latency = result.latency;
        self.message = result.message().map(str::to_string);
        self.error = result.error().map(str::to_string);
        self.last_checked = result.timestamp;

        self.history.push_front(result);
        self.history.truncate(SERVICE_HISTORY_LIMIT);

        previous
    }

    #[inline]
    pub fn total_checks(&self) -> u64 {
        self.successes + self.failures + self.degraded
    }

    /// Share of checks that were healthy; 1.0 before any check
    pub fn uptime(&self) -> f64 {
        match self.total_checks() {
            0 => 1.0,
            total => self.successes as f64 / total as f64,
        }
    }

    /// Share of checks that were down; 0.0 before any check
    pub fn error_rate(&self) -> f64 {
        match self.total_checks() {
            0 => 0.0,
            total => self.failures as f64 / total as f64,
        }
    }
}
