//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the APS proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Upstream document API (token + data endpoints).
    pub upstream: UpstreamConfig,

    /// Internal download service.
    pub download: DownloadConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Request limits and CORS.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

/// Upstream document API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL shared by the token and data endpoints.
    pub base_url: String,

    /// Scopes requested in the client-credentials grant.
    pub scopes: Vec<String>,

    /// Honour HTTP(S)_PROXY environment variables for outbound calls.
    pub system_proxy: bool,
}

impl UpstreamConfig {
    /// Space-separated scope string as sent in the token request.
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://developer.api.autodesk.com".to_string(),
            scopes: vec![
                "account:read".to_string(),
                "account:write".to_string(),
                "data:read".to_string(),
                "data:write".to_string(),
            ],
            system_proxy: true,
        }
    }
}

/// Internal download service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Full URL of the download endpoint.
    pub url: String,

    /// Header carrying the caller's API key.
    pub api_key_header: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5001/api/v1/download".to_string(),
            api_key_header: "X-API-Key".to_string(),
        }
    }
}

/// Timeout configuration. Unset values mean "no explicit deadline".
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request deadline in seconds.
    pub request_secs: Option<u64>,

    /// Outbound connection establishment timeout in seconds.
    pub upstream_connect_secs: Option<u64>,

    /// Outbound total request timeout in seconds.
    pub upstream_request_secs: Option<u64>,
}

impl TimeoutConfig {
    pub fn request(&self) -> Option<Duration> {
        self.request_secs.map(Duration::from_secs)
    }

    pub fn upstream_connect(&self) -> Option<Duration> {
        self.upstream_connect_secs.map(Duration::from_secs)
    }

    pub fn upstream_request(&self) -> Option<Duration> {
        self.upstream_request_secs.map(Duration::from_secs)
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Log file rotation policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Console/file line format.
    pub log_format: LogFormat,

    /// Directory for the log file. `None` logs to stdout only.
    pub log_dir: Option<String>,

    /// Log file name inside `log_dir`.
    pub log_file: String,

    /// Log file rotation.
    pub log_rotation: LogRotation,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            log_dir: Some("logs".to_string()),
            log_file: "server.log".to_string(),
            log_rotation: LogRotation::Never,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Request limits and cross-origin policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,

    /// Allow cross-origin browser callers.
    pub cors_enabled: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1MB
            cors_enabled: true,
        }
    }
}
