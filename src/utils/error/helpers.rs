//! Helper functions for creating specific error types

use super::types::HealthError;

impl HealthError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn probe<S: Into<String>>(message: S) -> Self {
        Self::Probe(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn sink<S: Into<String>>(message: S) -> Self {
        Self::Sink(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the error came from talking to a remote endpoint
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpClient(_) | Self::Timeout(_) | Self::Io(_))
    }
}
