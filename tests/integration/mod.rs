//! Integration tests for healthwatch
//!
//! These tests drive the public API across components. HTTP endpoints are
//! served by wiremock.

pub mod config_tests;
pub mod heartbeat_tests;
pub mod monitor_flow_tests;
pub mod system_tests;
