//! Alerting configuration

use super::*;
use crate::monitoring::AlertSeverity;
use serde::{Deserialize, Serialize};

/// Alert sink configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Slack webhook URL
    #[serde(default)]
    pub slack_webhook: Option<String>,
    /// Lowest severity forwarded to Slack
    #[serde(default = "default_slack_min_severity")]
    pub slack_min_severity: AlertSeverity,
    /// Event store sink
    #[serde(default)]
    pub event_store: EventStoreConfig,
    /// Per-delivery timeout
    #[serde(default = "default_timeout_ms")]
    pub sink_timeout_ms: u64,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            slack_webhook: None,
            slack_min_severity: default_slack_min_severity(),
            event_store: EventStoreConfig::default(),
            sink_timeout_ms: default_timeout_ms(),
        }
    }
}

/// REST table endpoint receiving one row per alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStoreConfig {
    /// Base URL, e.g. `https://project.example.co`
    #[serde(default)]
    pub url: Option<String>,
    /// Sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_alerts_table")]
    pub table: String,
}

impl Default for EventStoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: default_alerts_table(),
        }
    }
}

fn default_slack_min_severity() -> AlertSeverity {
    AlertSeverity::Info
}

fn default_alerts_table() -> String {
    "health_alerts".to_string()
}
