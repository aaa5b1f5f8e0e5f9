//! Error types for the health pipeline

use thiserror::Error;

/// Result type alias for the health pipeline
pub type Result<T> = std::result::Result<T, HealthError>;

/// Main error type for the health pipeline
#[derive(Error, Debug)]
pub enum HealthError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// A probe could not determine the health of its dependency
    #[error("Probe error: {0}")]
    Probe(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Alert sink delivery errors
    #[error("Alert sink error: {0}")]
    Sink(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
