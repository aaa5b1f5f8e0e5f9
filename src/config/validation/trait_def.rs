//! Validation trait definition

/// Validation trait for configuration sections.
///
/// The error is a human readable reason; [`crate::config::Config::validate`]
/// wraps it into a configuration error naming the section.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
