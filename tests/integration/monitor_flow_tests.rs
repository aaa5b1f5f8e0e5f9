//! Monitor flow integration tests
//!
//! Transition alerts, listener delivery and aggregate status over several cycles.

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::common::assertions::{SnapshotAssertions, assert_alert};
    use crate::common::{FlakyProbe, ScriptedProbe, TestPipeline};
    use healthwatch::{AlertKind, AlertSeverity, OverallStatus, Probe, ServiceStatus};
    use std::sync::{Arc, Mutex};

    use ServiceStatus::{Degraded, Down, Healthy};

    #[tokio::test]
    async fn test_outage_and_recovery_raise_two_alerts() {
        let db = Arc::new(ScriptedProbe::new(
            "database",
            &[Healthy, Healthy, Down, Down, Down, Healthy],
        ));
        let pipeline = TestPipeline::new(vec![db.clone()]);

        pipeline.run_cycles(6).await;

        let alerts = pipeline.sink.alerts();
        assert_eq!(alerts.len(), 2);
        assert_alert(&alerts[0], AlertKind::ServiceHealth, AlertSeverity::Critical);
        assert_alert(&alerts[1], AlertKind::ServiceRecovered, AlertSeverity::Info);
        assert_eq!(pipeline.sink.messages(), vec!["database is down", "database recovered"]);

        let status = pipeline.monitor.get_status();
        status.assert_service("database", Healthy);
        let database = status.service("database").unwrap();
        assert_eq!(database.checks, 6);
        assert_approx_eq!(database.uptime, 0.5);
        assert_approx_eq!(database.error_rate, 0.5);
        assert_eq!(database.history.len(), 6);
        assert_eq!(database.history[0].status(), Healthy);
        assert_eq!(database.history[1].status(), Down);
    }

    #[tokio::test]
    async fn test_mixed_services_aggregate_status() {
        let pipeline = TestPipeline::new(vec![
            Arc::new(ScriptedProbe::new("database", &[Healthy, Healthy])),
            Arc::new(ScriptedProbe::new("ai", &[Healthy, Degraded])),
            Arc::new(ScriptedProbe::new("colony", &[Healthy, Down])),
        ]);

        pipeline.run_cycles(1).await;
        assert_eq!(pipeline.monitor.get_status().overall_status, OverallStatus::Healthy);

        pipeline.run_cycles(1).await;
        let status = pipeline.monitor.get_status();
        assert_eq!(status.overall_status, OverallStatus::Down);
        status.assert_service("ai", Degraded);
        status.assert_service("colony", Down);

        let mut severities: Vec<AlertSeverity> =
            pipeline.sink.alerts().iter().map(|alert| alert.severity).collect();
        severities.sort();
        assert_eq!(severities, vec![AlertSeverity::Warning, AlertSeverity::Critical]);
    }

    #[tokio::test]
    async fn test_erroring_probe_reported_down_then_recovers() {
        let pipeline = TestPipeline::new(vec![Arc::new(FlakyProbe::new("storage", 2)) as Arc<dyn Probe>]);

        pipeline.run_cycles(3).await;

        let alerts = pipeline.sink.alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].context["error"], "Probe error: upstream reset the connection");
        assert_alert(&alerts[1], AlertKind::ServiceRecovered, AlertSeverity::Info);

        let storage = pipeline.monitor.service_health("storage").unwrap();
        assert_eq!(storage.message.as_deref(), Some("back"));
        assert!(storage.error.is_none());
    }

    #[tokio::test]
    async fn test_listeners_see_every_cycle_in_order() {
        let pipeline = TestPipeline::new(vec![Arc::new(ScriptedProbe::new(
            "database",
            &[Healthy, Degraded, Down],
        ))]);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let subscription = pipeline.monitor.on_change(move |snapshot| {
            sink.lock().unwrap().push(snapshot.overall_status);
        });

        pipeline.run_cycles(3).await;
        assert!(subscription.unsubscribe());
        pipeline.run_cycles(1).await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec![OverallStatus::Healthy, OverallStatus::Degraded, OverallStatus::Down]
        );
    }

    #[tokio::test]
    async fn test_snapshot_serializes_for_collaborators() {
        let pipeline = TestPipeline::new(vec![Arc::new(ScriptedProbe::new("database", &[Down]))]);
        pipeline.run_cycles(1).await;

        let json = serde_json::to_value(pipeline.monitor.get_status()).unwrap();

        assert_eq!(json["overall_status"], "down");
        assert_eq!(json["services"][0]["name"], "database");
        assert_eq!(json["services"][0]["status"], "down");
        assert_eq!(json["services"][0]["error"], "connection refused");
        assert_eq!(json["heartbeat"]["consecutive_failures"], 0);
    }

    #[tokio::test]
    async fn test_alert_stats_follow_transitions() {
        let pipeline = TestPipeline::new(vec![Arc::new(ScriptedProbe::new(
            "database",
            &[Down, Healthy, Degraded],
        ))]);

        pipeline.run_cycles(3).await;

        let stats = pipeline.alerter.stats();
        assert_eq!(stats.total_alerts, 3);
        assert_eq!(stats.alerts_by_source.get("database"), Some(&3));
        assert_eq!(stats.count_for_severity(AlertSeverity::Info), 1);
    }
}
