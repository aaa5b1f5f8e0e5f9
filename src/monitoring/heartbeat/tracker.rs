//! Heartbeat outcome tracker

use crate::monitoring::alerts::Alerter;
use crate::monitoring::clock::{Clock, SystemClock};
use crate::monitoring::types::{Alert, AlertKind, AlertSeverity};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Consecutive failures before the missed-heartbeat alert
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

/// Number of heartbeat outcomes kept
pub const HEARTBEAT_HISTORY_LIMIT: usize = 50;

/// Result of a single heartbeat attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum HeartbeatOutcome {
    Success {
        #[serde(rename = "latency_ms", with = "crate::monitoring::probe::millis_serde")]
        latency: Option<Duration>,
    },
    Failure {
        error: String,
    },
}

/// One entry of the heartbeat history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartbeatEntry {
    #[serde(flatten)]
    pub outcome: HeartbeatOutcome,
    pub timestamp: DateTime<Utc>,
}

impl HeartbeatEntry {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, HeartbeatOutcome::Success { .. })
    }
}

/// Snapshot of the tracker state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeartbeatStats {
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_failure_at: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
    /// Most recent outcomes, newest first
    pub history: Vec<HeartbeatEntry>,
}

#[derive(Debug, Default)]
struct TrackerState {
    last_success_at: Option<DateTime<Utc>>,
    last_failure_at: Option<DateTime<Utc>>,
    consecutive_failures: u32,
    /// Set once the current failure streak has alerted
    alerted: bool,
    history: VecDeque<HeartbeatEntry>,
}

impl TrackerState {
    fn push(&mut self, outcome: HeartbeatOutcome, timestamp: DateTime<Utc>) {
        self.history.push_front(HeartbeatEntry { outcome, timestamp });
        self.history.truncate(HEARTBEAT_HISTORY_LIMIT);
    }
}

/// Records heartbeat outcomes and alerts once per failure streak
#[derive(Debug)]
pub struct HeartbeatTracker {
    source: String,
    failure_threshold: u32,
    state: Mutex<TrackerState>,
    alerter: Arc<Alerter>,
    clock: Arc<dyn Clock>,
}

impl HeartbeatTracker {
    pub fn new(alerter: Arc<Alerter>) -> Self {
        Self {
            source: "healthwatch".to_string(),
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            state: Mutex::new(TrackerState::default()),
            alerter,
            clock: Arc::new(SystemClock),
        }
    }

    /// Set the alert threshold. Zero is treated as one.
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold.max(1);
        self
    }

    /// Name used as the alert's service
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn failure_threshold(&self) -> u32 {
        self.failure_threshold
    }

    /// Record a successful heartbeat. Ends any failure streak.
    pub fn record_success(&self, latency: Option<Duration>) {
        let now = self.clock.now();
        let mut state = self.state.lock();

        if state.consecutive_failures > 0 {
            debug!(
                source = %self.source,
                failures = state.consecutive_failures,
                "Heartbeat restored"
            );
        }

        state.last_success_at = Some(now);
        state.consecutive_failures = 0;
        state.alerted = false;
        state.push(HeartbeatOutcome::Success { latency }, now);
    }

    /// Record a failed heartbeat.
    ///
    /// Raises one critical alert when the streak reaches the threshold; later
    /// failures in the same streak stay silent. If the alert could not be handed
    /// to the alerter, the next failure of the streak raises it again.
    pub fn record_failure(&self, error: impl Display) {
        let now = self.clock.now();
        let error = error.to_string();
        warn!(source = %self.source, error = %error, "Heartbeat failed");

        let mut state = self.state.lock();
        state.consecutive_failures = state.consecutive_failures.saturating_add(1);
        state.last_failure_at = Some(now);
        state.push(HeartbeatOutcome::Failure { error }, now);

        if state.consecutive_failures >= self.failure_threshold && !state.alerted {
            let alert = Alert::new(
                AlertKind::HeartbeatMissed,
                AlertSeverity::Critical,
                format!(
                    "Heartbeat from {} missed {} times",
                    self.source, state.consecutive_failures
                ),
            )
            .with_service(&self.source)
            .with_context("consecutive_failures", state.consecutive_failures)
            .with_context("last_failure_at", now.to_rfc3339())
            .at(now);

            state.alerted = self.alerter.dispatch(alert);
        }
    }

    /// Current state. Returns an owned copy.
    pub fn get_stats(&self) -> HeartbeatStats {
        let state = self.state.lock();
        HeartbeatStats {
            last_success_at: state.last_success_at,
            last_failure_at: state.last_failure_at,
            consecutive_failures: state.consecutive_failures,
            history: state.history.iter().cloned().collect(),
        }
    }
}
