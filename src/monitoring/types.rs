//! Type definitions for service status and alerts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health status reported for a single service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Dependency answered as expected
    Healthy,
    /// Dependency is reachable but answered in a non-ideal way
    Degraded,
    /// Dependency could not be reached or its health could not be determined
    Down,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Healthy => "healthy",
            ServiceStatus::Degraded => "degraded",
            ServiceStatus::Down => "down",
        }
    }

    #[inline]
    pub fn is_healthy(&self) -> bool {
        matches!(self, ServiceStatus::Healthy)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worst-case status across all monitored services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// No service has reported yet
    Unknown,
    Healthy,
    Degraded,
    Down,
}

impl OverallStatus {
    /// Fold service statuses into the overall status.
    ///
    /// `down` wins over `degraded`, which wins over `healthy`. An empty set is `unknown`.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ServiceStatus>,
    {
        let mut reported = false;
        let mut degraded = false;

        for status in statuses {
            reported = true;
            match status {
                ServiceStatus::Down => return OverallStatus::Down,
                ServiceStatus::Degraded => degraded = true,
                ServiceStatus::Healthy => {}
            }
        }

        if degraded {
            OverallStatus::Degraded
        } else if reported {
            OverallStatus::Healthy
        } else {
            OverallStatus::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Unknown => "unknown",
            OverallStatus::Healthy => "healthy",
            OverallStatus::Degraded => "degraded",
            OverallStatus::Down => "down",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert severity levels, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "INFO"),
            AlertSeverity::Warning => write!(f, "WARNING"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// What kind of event raised an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// A service entered `degraded` or `down`
    #[serde(rename = "service.health")]
    ServiceHealth,
    /// A service returned to `healthy`
    #[serde(rename = "service.recovered")]
    ServiceRecovered,
    /// The heartbeat failed past its threshold
    #[serde(rename = "heartbeat.missed")]
    HeartbeatMissed,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::ServiceHealth => "service.health",
            AlertKind::ServiceRecovered => "service.recovered",
            AlertKind::HeartbeatMissed => "heartbeat.missed",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single notification handed to the alerter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert ID
    pub id: String,
    /// Alert type tag
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Alert severity
    pub severity: AlertSeverity,
    /// Human readable message
    pub message: String,
    /// Originating service or signal name
    pub service: Option<String>,
    /// Free-form context
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
    /// When the alert was raised
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Alert {
    pub fn new(kind: AlertKind, severity: AlertSeverity, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            severity,
            message: message.into(),
            service: None,
            context: serde_json::Map::new(),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_context(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn at(mut self, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Name used for per-source statistics
    pub fn source(&self) -> &str {
        self.service.as_deref().unwrap_or("unknown")
    }
}
