//! Configuration validation.
//!
//! # Responsibilities
//! - Require a target URL and check that it is an absolute http(s) URL
//! - Check the method is a valid HTTP token
//! - Validate value ranges (timeout > 0, attempts >= 1)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RawSettings → Result<ProbeConfig, Vec<ValidationError>>
//! - Runs before any attempt is made

use reqwest::Method;
use thiserror::Error;
use url::Url;

use crate::config::schema::{ProbeConfig, RawSettings};

/// A single semantic problem with the merged settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("TARGET_URL env var is required")]
    MissingTargetUrl,

    #[error("TARGET_URL '{url}' is not a valid URL: {reason}")]
    InvalidTargetUrl { url: String, reason: String },

    #[error("TARGET_URL scheme '{0}' is not supported (expected http or https)")]
    UnsupportedScheme(String),

    #[error("METHOD '{0}' is not a valid HTTP method")]
    InvalidMethod(String),

    #[error("TIMEOUT_MS must be greater than zero")]
    ZeroTimeout,

    #[error("MAX_RETRIES must be at least 1")]
    ZeroAttempts,
}

/// Check merged settings and produce the immutable config.
pub fn validate_settings(raw: &RawSettings) -> Result<ProbeConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let target_url = match raw.target_url.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(ValidationError::MissingTargetUrl);
            None
        }
        Some(s) => match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some((url, s.to_string())),
            Ok(url) => {
                errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
                None
            }
            Err(e) => {
                errors.push(ValidationError::InvalidTargetUrl {
                    url: s.to_string(),
                    reason: e.to_string(),
                });
                None
            }
        },
    };

    let method_name = raw.method.trim().to_ascii_uppercase();
    let method = match Method::from_bytes(method_name.as_bytes()) {
        Ok(m) if !method_name.is_empty() => Some(m),
        _ => {
            errors.push(ValidationError::InvalidMethod(raw.method.clone()));
            None
        }
    };

    if raw.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if raw.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }

    match (target_url, method) {
        (Some((target_url, display_url)), Some(method)) if errors.is_empty() => Ok(ProbeConfig {
            target_url,
            display_url,
            method,
            timeout_ms: raw.timeout_ms,
            max_attempts: raw.max_attempts,
            retry_delay_ms: raw.retry_delay_ms,
        }),
        _ => Err(errors),
    }
}
