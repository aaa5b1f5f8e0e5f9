//! Configuration management for the health pipeline
//!
//! This module handles loading, validation, and management of all configuration.

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{HealthError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Check schedule
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Heartbeat tracker and emitter
    #[serde(default)]
    pub heartbeat: HeartbeatConfig,
    /// Alert sinks
    #[serde(default)]
    pub alerting: AlertingConfig,
    /// HTTP probes
    #[serde(default)]
    pub probes: Vec<ProbeConfig>,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HealthError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| HealthError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise from defaults; environment
    /// variables override either
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => {
                info!("Loading configuration from: {:?}", path);
                let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                    HealthError::Config(format!("Failed to read config file: {}", e))
                })?;
                Self::from_yaml(&content)?
            }
            None => Self::default(),
        };

        let config = base.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.monitor
            .validate()
            .map_err(|e| HealthError::Config(format!("Monitor config error: {}", e)))?;
        self.heartbeat
            .validate()
            .map_err(|e| HealthError::Config(format!("Heartbeat config error: {}", e)))?;
        self.alerting
            .validate()
            .map_err(|e| HealthError::Config(format!("Alerting config error: {}", e)))?;
        validation::validate_probes(&self.probes)
            .map_err(|e| HealthError::Config(format!("Probe config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| HealthError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
