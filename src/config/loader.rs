//! Configuration loading utilities
//!
//! Environment variables override values from the file (or the defaults).

use super::Config;
use super::models::ProbeConfig;
use crate::utils::error::{HealthError, Result};
use std::str::FromStr;
use tracing::debug;

impl Config {
    /// Apply `HEALTH_*` overrides read through `lookup`
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Monitor configuration
        if let Some(value) = lookup("HEALTH_INTERVAL_SECS") {
            self.monitor.interval_secs = parse("HEALTH_INTERVAL_SECS", &value)?;
        }
        if let Some(value) = lookup("HEALTH_PROBE_TIMEOUT_MS") {
            self.monitor.probe_timeout_ms = parse("HEALTH_PROBE_TIMEOUT_MS", &value)?;
        }

        // Heartbeat configuration
        if let Some(value) = lookup("HEALTH_FAILURE_THRESHOLD") {
            self.heartbeat.failure_threshold = parse("HEALTH_FAILURE_THRESHOLD", &value)?;
        }
        if let Some(url) = lookup("HEALTH_HEARTBEAT_URL") {
            self.heartbeat.url = non_empty(url);
        }

        // Alerting configuration
        if let Some(url) = lookup("HEALTH_SLACK_WEBHOOK_URL") {
            self.alerting.slack_webhook = non_empty(url);
        }
        if let Some(url) = lookup("HEALTH_EVENT_STORE_URL") {
            self.alerting.event_store.url = non_empty(url);
        }
        if let Some(key) = lookup("HEALTH_EVENT_STORE_KEY") {
            self.alerting.event_store.api_key = non_empty(key);
        }
        if let Some(table) = lookup("HEALTH_ALERTS_TABLE") {
            self.alerting.event_store.table = table;
        }

        // Probes replace the configured list
        if let Some(value) = lookup("HEALTH_PROBES") {
            self.probes = parse_probes(&value)?;
        }

        // Logging configuration
        if let Some(level) = lookup("HEALTH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(value) = lookup("HEALTH_LOG_JSON") {
            self.logging.json = parse_flag("HEALTH_LOG_JSON", &value)?;
        }

        debug!("Applied environment overrides");
        Ok(self)
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| HealthError::config(format!("Invalid {}: {}", key, e)))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(HealthError::config(format!("Invalid {}: {}", key, other))),
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse `name=url,name=url`
pub(crate) fn parse_probes(value: &str) -> Result<Vec<ProbeConfig>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((name, url)) => Ok(ProbeConfig::new(name.trim(), url.trim())),
            None => Err(HealthError::config(format!(
                "Invalid HEALTH_PROBES entry '{}': expected name=url",
                entry
            ))),
        })
        .collect()
}
