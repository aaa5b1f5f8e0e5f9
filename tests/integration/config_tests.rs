//! Configuration integration tests
//!
//! Loading from YAML files and validation failures surfaced through the public API.

#[cfg(test)]
mod tests {
    use healthwatch::config::{Config, ProbeConfig};
    use healthwatch::{AlertSeverity, HealthError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_minimal_file_fills_defaults() {
        let file = write_config(
            r#"
probes:
  - name: "database"
    url: "http://localhost:5432/health"
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.monitor.interval_secs, 60);
        assert_eq!(config.monitor.probe_timeout_ms, 10_000);
        assert_eq!(config.heartbeat.failure_threshold, 3);
        assert_eq!(config.heartbeat.source, "healthwatch");
        assert!(config.heartbeat.url.is_none());
        assert_eq!(config.alerting.slack_min_severity, AlertSeverity::Info);
        assert_eq!(config.alerting.event_store.table, "health_alerts");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.probes, vec![ProbeConfig::new("database", "http://localhost:5432/health")]);
    }

    #[tokio::test]
    async fn test_zero_interval_rejected() {
        let file = write_config("monitor:\n  interval_secs: 0\n");

        let err = Config::from_file(file.path()).await.unwrap_err();

        assert!(matches!(err, HealthError::Config(_)));
        assert!(err.to_string().contains("Monitor config error"));
    }

    #[tokio::test]
    async fn test_duplicate_probe_names_rejected() {
        let file = write_config(
            r#"
probes:
  - name: "ai"
    url: "https://ai.example.com"
  - name: "ai"
    url: "https://ai-backup.example.com"
"#,
        );

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Duplicate probe name"));
    }

    #[tokio::test]
    async fn test_malformed_yaml_rejected() {
        let file = write_config("probes: [name: ");

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let err = Config::from_yaml("alerting:\n  slack_min_severity: loud\n").unwrap_err();
        assert!(matches!(err, HealthError::Config(_)));
    }
}
