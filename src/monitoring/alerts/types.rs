//! Alert statistics

use std::collections::HashMap;

/// Counters kept by the alerter. Alerts themselves are not retained.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize)]
pub struct AlertStats {
    /// Total alerts sent
    pub total_alerts: u64,
    /// Alerts by severity
    pub alerts_by_severity: HashMap<String, u64>,
    /// Alerts by source
    pub alerts_by_source: HashMap<String, u64>,
    /// Sink deliveries that failed
    pub failed_deliveries: u64,
    /// Last alert timestamp
    pub last_alert: Option<chrono::DateTime<chrono::Utc>>,
}

impl AlertStats {
    pub(super) fn record(&mut self, alert: &crate::monitoring::types::Alert) {
        self.total_alerts += 1;
        *self
            .alerts_by_severity
            .entry(alert.severity.as_str().to_string())
            .or_insert(0) += 1;
        *self
            .alerts_by_source
            .entry(alert.source().to_string())
            .or_insert(0) += 1;
        self.last_alert = Some(alert.timestamp);
    }

    pub fn count_for_severity(&self, severity: crate::monitoring::types::AlertSeverity) -> u64 {
        self.alerts_by_severity
            .get(severity.as_str())
            .copied()
            .unwrap_or(0)
    }
}
