//! Alert sink fakes

use healthwatch::{Alert, AlertSink, Result};
use std::sync::Mutex;

/// Keeps every alert it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingSink {
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.alerts().into_iter().map(|alert| alert.message).collect()
    }
}

#[async_trait::async_trait]
impl AlertSink for RecordingSink {
    async fn send(&self, alert: &Alert) -> Result<()> {
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
