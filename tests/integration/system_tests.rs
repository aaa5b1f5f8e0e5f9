//! System wiring integration tests
//!
//! A configuration pointing at mock endpoints drives probes, sinks and the
//! heartbeat emitter through `MonitoringSystem`.

#[cfg(test)]
mod tests {
    use crate::common::ScriptedProbe;
    use healthwatch::config::{Config, ProbeConfig};
    use healthwatch::{MonitoringSystem, OverallStatus, Probe, ServiceStatus};
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> Config {
        let mut config = Config::default();
        config.monitor.probe_timeout_ms = 2_000;
        config.probes = vec![
            ProbeConfig::new("database", format!("{}/db/health", server.uri())),
            ProbeConfig::new("ai", format!("{}/ai/health", server.uri())),
        ];
        config.alerting.slack_webhook = Some(format!("{}/slack", server.uri()));
        config.alerting.event_store.url = Some(server.uri());
        config.heartbeat.url = Some(format!("{}/heartbeat", server.uri()));
        config
    }

    #[tokio::test]
    async fn test_run_once_probes_alerts_and_heartbeat() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/db/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ai/health"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/heartbeat"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/slack"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/health_alerts"))
            .and(body_partial_json(serde_json::json!({
                "type": "service.health",
                "severity": "warning",
                "service": "ai",
                "message": "ai is degraded"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let system = MonitoringSystem::from_config(&config_for(&server)).unwrap();
        let snapshot = system.run_once().await;

        assert_eq!(snapshot.overall_status, OverallStatus::Degraded);
        assert_eq!(snapshot.service("database").unwrap().status, ServiceStatus::Healthy);
        let ai = snapshot.service("ai").unwrap();
        assert_eq!(ai.status, ServiceStatus::Degraded);
        assert_eq!(ai.message.as_deref(), Some("http 401"));
        assert!(snapshot.heartbeat.last_success_at.is_some());
        assert_eq!(system.alerter().stats().failed_deliveries, 0);
    }

    #[tokio::test]
    async fn test_unreachable_sinks_do_not_fail_the_cycle() {
        let mut config = Config::default();
        config.alerting.slack_webhook = Some("http://127.0.0.1:9/slack".to_string());
        config.alerting.sink_timeout_ms = 2_000;

        let probes: Vec<Arc<dyn Probe>> =
            vec![Arc::new(ScriptedProbe::new("database", &[ServiceStatus::Down]))];
        let system = MonitoringSystem::with_probes(&config, probes).unwrap();

        let snapshot = system.run_once().await;

        assert_eq!(snapshot.overall_status, OverallStatus::Down);
        assert_eq!(system.alerter().stats().total_alerts, 1);
        assert_eq!(system.alerter().stats().failed_deliveries, 1);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.probes = vec![ProbeConfig::new("database", "not-a-url")];

        assert!(MonitoringSystem::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let config = Config::default();
        let probe = Arc::new(ScriptedProbe::new("database", &[ServiceStatus::Healthy]));
        let system = MonitoringSystem::with_probes(&config, vec![probe.clone() as Arc<dyn Probe>]).unwrap();

        system.start();
        assert!(system.monitor().is_running());
        assert!(system.emitter().is_none());

        for _ in 0..100 {
            if probe.calls() > 0 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        system.stop().await;

        assert!(!system.monitor().is_running());
        assert_eq!(system.monitor().get_status().services.len(), 1);
    }
}
