//! Alert sink implementations

use crate::monitoring::types::{Alert, AlertSeverity};
use crate::utils::error::{HealthError, Result};
use std::time::Duration;
use tracing::debug;

/// Default table for the event store sink
pub const DEFAULT_ALERTS_TABLE: &str = "health_alerts";

const DEFAULT_SINK_TIMEOUT: Duration = Duration::from_secs(10);

/// Destination for alerts
#[async_trait::async_trait]
pub trait AlertSink: Send + Sync + std::fmt::Debug {
    /// Deliver one alert. An unconfigured sink returns `Ok(())` without doing anything.
    async fn send(&self, alert: &Alert) -> Result<()>;

    /// Sink name used in logs
    fn name(&self) -> &str;

    /// Whether this sink wants alerts of the given severity
    fn supports_severity(&self, _severity: AlertSeverity) -> bool {
        true
    }
}

/// Chat webhook sink
#[derive(Debug, Clone)]
pub struct SlackSink {
    webhook_url: Option<String>,
    min_severity: AlertSeverity,
    timeout: Duration,
    client: reqwest::Client,
}

impl SlackSink {
    /// Create a sink. With no webhook URL every send is a no-op.
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url,
            min_severity: AlertSeverity::Info,
            timeout: DEFAULT_SINK_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_min_severity(mut self, min_severity: AlertSeverity) -> Self {
        self.min_severity = min_severity;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    fn payload(alert: &Alert) -> serde_json::Value {
        let timestamp = alert.timestamp.to_rfc3339();
        serde_json::json!({
            "text": format!("Health alert: {} - {}", alert.severity, alert.message),
            "blocks": [
                {
                    "type": "section",
                    "text": {
                        "type": "mrkdwn",
                        "text": format!(
                            "*Health alert*\n*Severity:* {}\n*Service:* {}\n*Message:* {}",
                            alert.severity.as_str(),
                            alert.service.as_deref().unwrap_or("n/a"),
                            alert.message
                        )
                    }
                },
                {
                    "type": "context",
                    "elements": [
                        {
                            "type": "mrkdwn",
                            "text": format!("Timestamp: {}", timestamp)
                        }
                    ]
                }
            ]
        })
    }
}

#[async_trait::async_trait]
impl AlertSink for SlackSink {
    async fn send(&self, alert: &Alert) -> Result<()> {
        let Some(webhook_url) = &self.webhook_url else {
            return Ok(());
        };

        let response = self
            .client
            .post(webhook_url)
            .timeout(self.timeout)
            .json(&Self::payload(alert))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HealthError::sink(format!(
                "Slack webhook returned status: {}",
                response.status()
            )));
        }

        debug!(alert_id = %alert.id, "Alert delivered to Slack");
        Ok(())
    }

    fn name(&self) -> &str {
        "slack"
    }

    fn supports_severity(&self, severity: AlertSeverity) -> bool {
        severity >= self.min_severity
    }
}

/// Structured event sink writing one row per alert to a REST table endpoint
/// (`POST {base_url}/rest/v1/{table}`)
#[derive(Debug, Clone)]
pub struct EventStoreSink {
    base_url: Option<String>,
    api_key: Option<String>,
    table: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl EventStoreSink {
    /// Create a sink. With no base URL every send is a no-op.
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            base_url,
            api_key,
            table: DEFAULT_ALERTS_TABLE.to_string(),
            timeout: DEFAULT_SINK_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn endpoint(&self, base_url: &str) -> String {
        format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), self.table)
    }

    fn row(alert: &Alert) -> serde_json::Value {
        serde_json::json!({
            "type": alert.kind,
            "severity": alert.severity,
            "service": alert.service,
            "message": alert.message,
            "context": alert.context,
            "created_at": alert.timestamp.to_rfc3339(),
        })
    }
}

#[async_trait::async_trait]
impl AlertSink for EventStoreSink {
    async fn send(&self, alert: &Alert) -> Result<()> {
        let Some(base_url) = &self.base_url else {
            return Ok(());
        };

        let mut request = self
            .client
            .post(self.endpoint(base_url))
            .timeout(self.timeout)
            .header("Prefer", "return=minimal")
            .json(&Self::row(alert));

        if let Some(api_key) = &self.api_key {
            request = request.header("apikey", api_key).bearer_auth(api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(HealthError::sink(format!(
                "event store insert into {} returned status: {}",
                self.table,
                response.status()
            )));
        }

        debug!(alert_id = %alert.id, table = %self.table, "Alert stored");
        Ok(())
    }

    fn name(&self) -> &str {
        "event_store"
    }
}
