//! Heartbeat liveness tracking
//!
//! The tracker is a passive recorder of heartbeat outcomes. The optional
//! [`HeartbeatEmitter`] produces those outcomes by posting a heartbeat event on an
//! interval.

mod emitter;
mod tracker;


pub use emitter::HeartbeatEmitter;
pub use tracker::{
    DEFAULT_FAILURE_THRESHOLD, HEARTBEAT_HISTORY_LIMIT, HeartbeatEntry, HeartbeatOutcome,
    HeartbeatStats, HeartbeatTracker,
};
