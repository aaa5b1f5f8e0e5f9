//! Custom test assertions
//!
//! Provides domain-specific assertions for health snapshots and alerts.

use healthwatch::{Alert, AlertKind, AlertSeverity, HealthSnapshot, ServiceStatus};

/// Assertions for HealthSnapshot
pub trait SnapshotAssertions {
    /// Assert a service is present with the given status
    fn assert_service(&self, name: &str, status: ServiceStatus);
}

impl SnapshotAssertions for HealthSnapshot {
    fn assert_service(&self, name: &str, status: ServiceStatus) {
        let service = self
            .service(name)
            .unwrap_or_else(|| panic!("Expected service '{}' in snapshot", name));
        assert_eq!(
            service.status, status,
            "Service '{}' has status {}, expected {}",
            name, service.status, status
        );
    }
}

/// Assert an alert has the expected kind and severity
pub fn assert_alert(alert: &Alert, kind: AlertKind, severity: AlertSeverity) {
    assert_eq!(alert.kind, kind, "Unexpected alert kind for '{}'", alert.message);
    assert_eq!(
        alert.severity, severity,
        "Unexpected alert severity for '{}'",
        alert.message
    );
}

/// Assert two values are approximately equal (for floats)
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        assert_approx_eq!($left, $right, 1e-6_f64)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {
        let left_val: f64 = $left as f64;
        let right_val: f64 = $right as f64;
        let diff = (left_val - right_val).abs();
        assert!(
            diff < $epsilon,
            "assertion failed: `(left ~ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` (epsilon: `{:?}`)",
            left_val,
            right_val,
            diff,
            $epsilon
        );
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_approx_eq_macro() {
        assert_approx_eq!(2.0 / 3.0, 0.6666667);
        assert_approx_eq!(0.1 + 0.2, 0.3, 1e-10_f64);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_approx_eq_failure() {
        assert_approx_eq!(0.5, 0.75);
    }
}
