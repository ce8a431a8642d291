//! Shared-PIN access gate.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::http::{header, HeaderMap};
use subtle::ConstantTimeEq;

use crate::config::Config;
use crate::errors::AppError;

/// Header name for the admin PIN.
pub const ADMIN_PIN_HEADER: &str = "x-admin-pin";

/// Check whether the request carries the configured admin PIN.
///
/// If no PIN is configured, all requests are allowed (dev mode).
pub fn authorize(config: &Config, headers: &HeaderMap) -> bool {
    let Some(expected) = config.admin_pin.as_deref() else {
        return true;
    };

    if let Some(provided) = headers.get(ADMIN_PIN_HEADER).and_then(|v| v.to_str().ok()) {
        return constant_time_compare(provided, expected);
    }

    // Also check Authorization header as bearer token
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "));

    match bearer {
        Some(bearer_pin) => constant_time_compare(bearer_pin, expected),
        None => false,
    }
}

/// Require the admin PIN, mapping failure to 401.
pub fn require_pin(config: &Config, headers: &HeaderMap) -> Result<(), AppError> {
    if authorize(config, headers) {
        Ok(())
    } else {
        Err(AppError::Unauthorized(
            "Missing or invalid admin PIN".to_string(),
        ))
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config_with_pin(pin: Option<&str>) -> Config {
        Config {
            admin_pin: pin.map(|p| p.to_string()),
            data_dir: "./data".into(),
            uploads_dir: "./data/uploads".into(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            app_title: "Baby Dashboard".to_string(),
            due_date: None,
        }
    }

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("test-pin-123", "test-pin-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("test-pin-123", "test-pin-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-pin"));
    }

    #[test]
    fn test_authorize_header() {
        let config = config_with_pin(Some("1234"));
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_PIN_HEADER, HeaderValue::from_static("1234"));
        assert!(authorize(&config, &headers));
    }

    #[test]
    fn test_authorize_bearer_fallback() {
        let config = config_with_pin(Some("1234"));
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer 1234"),
        );
        assert!(authorize(&config, &headers));
    }

    #[test]
    fn test_authorize_rejects_wrong_pin() {
        let config = config_with_pin(Some("1234"));
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_PIN_HEADER, HeaderValue::from_static("4321"));
        assert!(!authorize(&config, &headers));
        assert!(!authorize(&config, &HeaderMap::new()));
    }

    #[test]
    fn test_authorize_open_without_configured_pin() {
        let config = config_with_pin(None);
        assert!(authorize(&config, &HeaderMap::new()));
    }
}
