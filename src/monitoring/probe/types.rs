//! Probe result types

use crate::monitoring::types::ServiceStatus;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of a single health check, one variant per status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeOutcome {
    Healthy {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Degraded {
        message: String,
    },
    Down {
        error: String,
    },
}

impl ProbeOutcome {
    pub fn status(&self) -> ServiceStatus {
        match self {
            ProbeOutcome::Healthy { .. } => ServiceStatus::Healthy,
            ProbeOutcome::Degraded { .. } => ServiceStatus::Degraded,
            ProbeOutcome::Down { .. } => ServiceStatus::Down,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Healthy { message } => message.as_deref(),
            ProbeOutcome::Degraded { message } => Some(message),
            ProbeOutcome::Down { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Down { error } => Some(error),
            _ => None,
        }
    }
}

/// Result of one probe invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Stable service identifier
    pub service: String,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
    /// Time the check took, when measured
    #[serde(rename = "latency_ms", with = "millis", default)]
    pub latency: Option<Duration>,
    /// When the check completed
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ProbeResult {
    pub fn new(service: impl Into<String>, outcome: ProbeOutcome) -> Self {
        Self {
            service: service.into(),
            outcome,
            latency: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn healthy(service: impl Into<String>) -> Self {
        Self::new(service, ProbeOutcome::Healthy { message: None })
    }

    pub fn degraded(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            service,
            ProbeOutcome::Degraded {
                message: message.into(),
            },
        )
    }

    pub fn down(service: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(
            service,
            ProbeOutcome::Down {
                error: error.into(),
            },
        )
    }

    /// Attach a success message. Only healthy outcomes carry an optional message.
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        if let ProbeOutcome::Healthy { message } = &mut self.outcome {
            *message = Some(text.into());
        }
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn at(mut self, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[inline]
    pub fn status(&self) -> ServiceStatus {
        self.outcome.status()
    }

    pub fn message(&self) -> Option<&str> {
        self.outcome.message()
    }

    pub fn error(&self) -> Option<&str> {
        self.outcome.error()
    }
}

/// Serializes an optional duration as whole milliseconds
pub(crate) mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(latency: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match latency {
            Some(latency) => serializer.serialize_some(&crate::utils::duration_millis(*latency)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
