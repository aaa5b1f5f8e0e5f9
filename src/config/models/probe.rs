//! Probe configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One HTTP probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Service name, unique across probes
    pub name: String,
    /// URL the probe GETs
    pub url: String,
    /// Request timeout; the monitor probe timeout applies when unset
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Message reported with a healthy result
    #[serde(default)]
    pub success_message: Option<String>,
}

impl ProbeConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout_ms: None,
            success_message: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
