//! Configuration section validators

use super::trait_def::Validate;
use super::endpoint::validate_http_url;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

impl Validate for MonitorConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating monitor configuration");

        if self.interval_secs == 0 {
            return Err("Check interval must be greater than 0".to_string());
        }

        if self.probe_timeout_ms == 0 {
            return Err("Probe timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for HeartbeatConfig {
    fn validate(&self) -> Result<(), String> {
        if self.failure_threshold == 0 {
            return Err("Heartbeat failure threshold must be greater than 0".to_string());
        }

        if self.source.trim().is_empty() {
            return Err("Heartbeat source cannot be empty".to_string());
        }

        if let Some(url) = &self.url {
            validate_http_url(url, "Heartbeat URL")?;
            if self.interval_secs == 0 {
                return Err("Heartbeat interval must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for AlertingConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(webhook) = &self.slack_webhook {
            validate_http_url(webhook, "Slack webhook")?;
        }

        self.event_store.validate()?;

        if self.sink_timeout_ms == 0 {
            return Err("Sink timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for EventStoreConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.url {
            validate_http_url(url, "Event store URL")?;
        }

        if self.table.trim().is_empty() {
            return Err("Event store table cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for ProbeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Probe name cannot be empty".to_string());
        }

        validate_http_url(&self.url, &format!("Probe '{}'", self.name))?;

        if self.timeout_ms == Some(0) {
            return Err(format!("Probe '{}' timeout must be greater than 0", self.name));
        }

        Ok(())
    }
}

/// Validate each probe and require unique names
pub fn validate_probes(probes: &[ProbeConfig]) -> Result<(), String> {
    let mut names = HashSet::new();

    for probe in probes {
        probe.validate()?;
        if !names.insert(probe.name.as_str()) {
            return Err(format!("Duplicate probe name: {}", probe.name));
        }
    }

    Ok(())
}
