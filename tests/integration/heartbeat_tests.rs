//! Heartbeat integration tests

#[cfg(test)]
mod tests {
    use crate::common::TestPipeline;
    use crate::common::assertions::assert_alert;
    use healthwatch::{AlertKind, AlertSeverity, HeartbeatEmitter};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_five_failures_alert_once() {
        let pipeline = TestPipeline::new(Vec::new());

        for attempt in 0..5 {
            pipeline.heartbeat.record_failure(format!("attempt {} timed out", attempt));
        }
        pipeline.alerter.flush().await;

        let alerts = pipeline.sink.alerts();
        assert_eq!(alerts.len(), 1);
        assert_alert(&alerts[0], AlertKind::HeartbeatMissed, AlertSeverity::Critical);
        assert_eq!(alerts[0].context["consecutive_failures"], 3);
    }

    #[tokio::test]
    async fn test_heartbeat_stats_in_monitor_snapshot() {
        let pipeline = TestPipeline::new(Vec::new());

        pipeline.heartbeat.record_success(Some(Duration::from_millis(80)));
        pipeline.heartbeat.record_failure("gateway timeout");

        let snapshot = pipeline.monitor.get_status();
        assert_eq!(snapshot.heartbeat.consecutive_failures, 1);
        assert_eq!(snapshot.heartbeat.history.len(), 2);
        assert!(!snapshot.heartbeat.history[0].is_success());
        assert!(snapshot.heartbeat.last_success_at.is_some());
    }

    #[tokio::test]
    async fn test_emitter_outage_then_restore() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(4)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let pipeline = TestPipeline::new(Vec::new());
        let emitter = Arc::new(HeartbeatEmitter::new(server.uri(), pipeline.heartbeat.clone()));

        for _ in 0..4 {
            assert!(emitter.beat().await.is_err());
        }
        assert!(emitter.beat().await.is_ok());
        pipeline.alerter.flush().await;

        let stats = pipeline.heartbeat.get_stats();
        assert_eq!(stats.consecutive_failures, 0);
        assert_eq!(stats.history.len(), 5);
        assert_eq!(pipeline.sink.alerts().len(), 1);
    }
}
