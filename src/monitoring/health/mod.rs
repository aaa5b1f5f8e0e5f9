//! Service health monitoring
//!
//! [`HealthMonitor`] runs the registered probes, keeps a [`ServiceHealthRecord`] per
//! service and raises alerts when a service changes status.

mod monitor;
mod record;
mod tasks;
mod types;


pub use monitor::{HealthMonitor, HealthMonitorConfig, Listener, Subscription};
pub use record::{SERVICE_HISTORY_LIMIT, ServiceHealthRecord};
pub use types::{HealthSnapshot, ServiceSummary};
