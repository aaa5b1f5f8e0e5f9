//! Endpoint URL checks

use url::Url;

/// Check that `url_str` is an absolute http(s) URL with a host.
///
/// Loopback and private hosts are allowed: probes commonly target local services.
pub fn validate_http_url(url_str: &str, context: &str) -> Result<(), String> {
    let url =
        Url::parse(url_str).map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            ));
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("{} URL must have a valid host", context));
    }

    Ok(())
}
