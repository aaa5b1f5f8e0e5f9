//! Heartbeat configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Heartbeat tracker and emitter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatConfig {
    /// Consecutive failures before alerting
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    /// Name reported in heartbeat events and alerts
    #[serde(default = "default_source")]
    pub source: String,
    /// Endpoint the emitter posts to; no emitter runs without it
    #[serde(default)]
    pub url: Option<String>,
    /// Seconds between heartbeats
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            source: default_source(),
            url: None,
            interval_secs: default_interval_secs(),
        }
    }
}

impl HeartbeatConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

fn default_failure_threshold() -> u32 {
    3
}

fn default_source() -> String {
    "healthwatch".to_string()
}
