//! Health monitor implementation
//!
//! The monitor runs every registered probe concurrently, folds the results into
//! per-service records, raises edge-triggered alerts on status transitions and
//! notifies subscribers with a consistent snapshot once per cycle.

use super::record::ServiceHealthRecord;
use super::types::{HealthSnapshot, ServiceSummary};
use crate::monitoring::alerts::Alerter;
use crate::monitoring::clock::{Clock, SystemClock};
use crate::monitoring::heartbeat::HeartbeatTracker;
use crate::monitoring::probe::{Probe, ProbeResult, run_guarded};
use crate::monitoring::types::{Alert, AlertKind, AlertSeverity, OverallStatus, ServiceStatus};
use crate::utils::{duration_millis, panic_message};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Health monitor configuration
#[derive(Debug, Clone)]
pub struct HealthMonitorConfig {
    /// Upper bound on a single probe invocation
    pub probe_timeout: Duration,
}

impl Default for HealthMonitorConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(10),
        }
    }
}

/// Callback invoked once per cycle with the fresh snapshot
pub type Listener = Arc<dyn Fn(&HealthSnapshot) + Send + Sync>;

type ListenerMap = RwLock<HashMap<u64, Listener>>;

/// Service records plus the completion time of the cycle that last folded them
#[derive(Debug, Default)]
struct ServiceTable {
    records: HashMap<String, ServiceHealthRecord>,
    checked_at: Option<DateTime<Utc>>,
}

/// Handle returned by [`HealthMonitor::on_change`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<ListenerMap>,
}

impl Subscription {
    /// Remove the listener. Returns false if it was already gone.
    pub fn unsubscribe(self) -> bool {
        self.listeners
            .upgrade()
            .is_some_and(|listeners| listeners.write().remove(&self.id).is_some())
    }
}

/// Orchestrates probes, service records, alerts and listeners
pub struct HealthMonitor {
    pub(super) config: HealthMonitorConfig,
    probes: Vec<Arc<dyn Probe>>,
    /// Only mutated in the fold-in phase of a cycle
    services: RwLock<ServiceTable>,
    listeners: Arc<ListenerMap>,
    next_listener_id: AtomicU64,
    alerter: Arc<Alerter>,
    heartbeat: Arc<HeartbeatTracker>,
    clock: Arc<dyn Clock>,
    /// Handle of the running schedule, if any
    pub(super) schedule: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl std::fmt::Debug for HealthMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthMonitor")
            .field("config", &self.config)
            .field("probes", &self.probes)
            .field("services", &self.services.read().records.len())
            .field("listeners", &self.listeners.read().len())
            .finish_non_exhaustive()
    }
}

impl HealthMonitor {
    /// Create a monitor over a fixed, ordered list of probes
    pub fn new(
        probes: Vec<Arc<dyn Probe>>,
        alerter: Arc<Alerter>,
        heartbeat: Arc<HeartbeatTracker>,
    ) -> Self {
        Self {
            config: HealthMonitorConfig::default(),
            probes,
            services: RwLock::new(ServiceTable::default()),
            listeners: Arc::new(RwLock::new(HashMap::new())),
            next_listener_id: AtomicU64::new(0),
            alerter,
            heartbeat,
            clock: Arc::new(SystemClock),
            schedule: Mutex::new(None),
        }
    }

    pub fn with_config(mut self, config: HealthMonitorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn probe_count(&self) -> usize {
        self.probes.len()
    }

    /// Run every probe once and fold the results in.
    ///
    /// Probes run concurrently; records are updated only after all of them
    /// resolved. The snapshot is taken under the same lock as the fold, so
    /// listeners see exactly this cycle's state.
    pub async fn run_checks(&self) -> HealthSnapshot {
        debug!(probes = self.probes.len(), "Running health check cycle");

        let timeout = self.config.probe_timeout;
        let results = join_all(
            self.probes
                .iter()
                .map(|probe| run_guarded(probe.as_ref(), timeout, self.clock.as_ref())),
        )
        .await;

        let (alerts, snapshot) = {
            let mut table = self.services.write();
            let alerts: Vec<Alert> = results
                .into_iter()
                .filter_map(|result| self.fold_result(&mut table.records, result))
                .collect();
            table.checked_at = Some(self.clock.now());
            (alerts, self.snapshot(&table))
        };

        for alert in alerts {
            self.alerter.dispatch(alert);
        }

        self.notify(&snapshot);
        snapshot
    }

    /// Current aggregate status. Returns an owned copy.
    ///
    /// Without a new cycle in between, this equals the snapshot returned by the
    /// last [`HealthMonitor::run_checks`] unless the heartbeat changed.
    pub fn get_status(&self) -> HealthSnapshot {
        self.snapshot(&self.services.read())
    }

    /// Summary of a single service, if it has reported
    pub fn service_health(&self, name: &str) -> Option<ServiceSummary> {
        self.services.read().records.get(name).map(ServiceSummary::from)
    }

    fn snapshot(&self, table: &ServiceTable) -> HealthSnapshot {
        let mut services: Vec<ServiceSummary> =
            table.records.values().map(ServiceSummary::from).collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));

        HealthSnapshot {
            overall_status: OverallStatus::from_statuses(services.iter().map(|s| s.status)),
            services,
            heartbeat: self.heartbeat.get_stats(),
            generated_at: table.checked_at.unwrap_or_else(|| self.clock.now()),
        }
    }

    /// Register a listener called after every cycle
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&HealthSnapshot) + Send + Sync + 'static,
    {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.write().insert(id, Arc::new(callback));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Apply one result and build the alert for its transition, if any
    fn fold_result(
        &self,
        records: &mut HashMap<String, ServiceHealthRecord>,
        result: ProbeResult,
    ) -> Option<Alert> {
        let (previous, record) = match records.entry(result.service.clone()) {
            Entry::Occupied(entry) => {
                let record = entry.into_mut();
                let previous = record.apply(result);
                (Some(previous), &*record)
            }
            Entry::Vacant(entry) => (None, &*entry.insert(ServiceHealthRecord::from_result(result))),
        };

        if previous != Some(record.status) {
            info!(
                service = %record.name,
                from = previous.map_or("unknown", |status| status.as_str()),
                to = %record.status,
                "Service status changed"
            );
        }

        transition_alert(previous, record).map(|alert| alert.at(self.clock.now()))
    }

    fn notify(&self, snapshot: &HealthSnapshot) {
        // Clone out so a listener may unsubscribe without deadlocking
        let listeners: Vec<Listener> = self.listeners.read().values().cloned().collect();

        for listener in listeners {
            if let Err(panic) = std::panic::catch_unwind(AssertUnwindSafe(|| listener(snapshot))) {
                warn!(
                    error = %panic_message(panic.as_ref()),
                    "Health monitor listener failed"
                );
            }
        }
    }
}

/// Edge-triggered alert for a status change.
///
/// Entering `down` is critical, entering `degraded` is a warning, and returning
/// to `healthy` from a reported non-healthy status is an info recovery. An
/// unchanged status never alerts.
pub(super) fn transition_alert(
    previous: Option<ServiceStatus>,
    record: &ServiceHealthRecord,
) -> Option<Alert> {
    let latency_ms = record.latency.map(duration_millis);

    match record.status {
        ServiceStatus::Down | ServiceStatus::Degraded if previous != Some(record.status) => {
            let severity = if record.status == ServiceStatus::Down {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            };
            let detail = record.error.clone().or_else(|| record.message.clone());

            Some(
                Alert::new(
                    AlertKind::ServiceHealth,
                    severity,
                    format!("{} is {}", record.name, record.status),
                )
                .with_service(&record.name)
                .with_context("latency_ms", latency_ms)
                .with_context("error", detail),
            )
        }
        ServiceStatus::Healthy if previous.is_some_and(|status| !status.is_healthy()) => Some(
            Alert::new(
                AlertKind::ServiceRecovered,
                AlertSeverity::Info,
                format!("{} recovered", record.name),
            )
            .with_service(&record.name)
            .with_context("latency_ms", latency_ms),
        ),
        _ => None,
    }
}
