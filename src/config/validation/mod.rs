//! Configuration validation
//!
//! - `trait_def`: the Validate trait
//! - `endpoint`: endpoint URL checks
//! - `validators`: Validate impls for every configuration section
//! - `tests`: test suite for all validators

mod endpoint;
mod trait_def;
mod validators;

pub use endpoint::validate_http_url;
pub use trait_def::Validate;
pub use validators::validate_probes;
