//! HTTP GET probe

use super::{Probe, ProbeOutcome, ProbeResult};
use crate::config::ProbeConfig;
use crate::utils::error::Result;
use std::time::{Duration, Instant};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_SUCCESS_MESSAGE: &str = "reachable";

/// Probe that issues a GET against a dependency endpoint.
///
/// 2xx is `healthy`, any other status is `degraded` (reachable but not answering
/// as expected), and a transport failure or timeout is `down`.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    name: String,
    url: String,
    timeout: Duration,
    success_message: String,
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a probe from configuration, falling back to `default_timeout`
    pub fn from_config(config: &ProbeConfig, default_timeout: Duration) -> Self {
        let mut probe = Self::new(&config.name, &config.url)
            .with_timeout(config.timeout().unwrap_or(default_timeout));
        if let Some(message) = &config.success_message {
            probe = probe.with_success_message(message);
        }
        probe
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = message.into();
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait::async_trait]
impl Probe for HttpProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<ProbeResult> {
        let start_time = Instant::now();

        let outcome = match self.client.get(&self.url).timeout(self.timeout).send().await {
            Ok(response) if response.status().is_success() => ProbeOutcome::Healthy {
                message: Some(self.success_message.clone()),
            },
            Ok(response) => ProbeOutcome::Degraded {
                message: format!("http {}", response.status().as_u16()),
            },
            Err(e) => ProbeOutcome::Down {
                error: e.to_string(),
            },
        };

        Ok(ProbeResult::new(&self.name, outcome).with_latency(start_time.elapsed()))
    }
}
