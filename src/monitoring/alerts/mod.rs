//! Alert fan-out
//!
//! The [`Alerter`] delivers each alert to every configured [`AlertSink`]. Delivery
//! is best-effort: sink failures are logged and counted, never returned.

mod alerter;
mod sinks;
mod types;


pub use alerter::Alerter;
pub use sinks::{AlertSink, EventStoreSink, SlackSink};
pub use types::AlertStats;
