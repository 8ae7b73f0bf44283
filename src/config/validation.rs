//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that upstream and download endpoints are usable base URLs
//! - Validate value ranges (timeouts > 0, body limit > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderName;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::new("listener.host", "must not be empty"));
    }

    if let Err(message) = check_http_url(&config.upstream.base_url) {
        errors.push(ValidationError::new("upstream.base_url", message));
    }

    if config.upstream.scopes.iter().all(|s| s.trim().is_empty()) {
        errors.push(ValidationError::new(
            "upstream.scopes",
            "at least one scope is required",
        ));
    }

    if let Err(message) = check_http_url(&config.download.url) {
        errors.push(ValidationError::new("download.url", message));
    }

    if HeaderName::from_bytes(config.download.api_key_header.as_bytes()).is_err() {
        errors.push(ValidationError::new(
            "download.api_key_header",
            format!("{:?} is not a valid header name", config.download.api_key_header),
        ));
    }

    let timeouts = [
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("timeouts.upstream_connect_secs", config.timeouts.upstream_connect_secs),
        ("timeouts.upstream_request_secs", config.timeouts.upstream_request_secs),
    ];
    for (field, value) in timeouts {
        if value == Some(0) {
            errors.push(ValidationError::new(field, "must be greater than zero"));
        }
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new(
            "security.max_body_size",
            "must be greater than zero",
        ));
    }

    let obs = &config.observability;
    if obs.log_dir.is_some() && obs.log_file.trim().is_empty() {
        errors.push(ValidationError::new(
            "observability.log_file",
            "must not be empty when log_dir is set",
        ));
    }

    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", obs.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("{:?} is not a valid URL: {}", raw, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme {:?}", url.scheme()));
    }
    if url.cannot_be_a_base() {
        return Err(format!("{:?} cannot carry a path", raw));
    }
    Ok(())
}
