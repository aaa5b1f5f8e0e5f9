//! Health monitor configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Check schedule configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between check cycles
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Deadline applied to each probe invocation
    #[serde(default = "default_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            probe_timeout_ms: default_timeout_ms(),
        }
    }
}

impl MonitorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}
