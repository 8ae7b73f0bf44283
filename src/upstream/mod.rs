//! Outbound HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (APS token exchange + data API listings)
//!     → download.rs (internal download service)
//!     → shared reqwest::Client (default connection pool)
//!     → UpstreamError on transport, status, or shape failure
//! ```
//!
//! # Design Decisions
//! - One `reqwest::Client` for every outbound call
//! - No retries; the first failure is reported to the caller
//! - Timeouts apply only when configured

pub mod client;
pub mod download;

use std::future::Future;
use std::time::Instant;

use thiserror::Error;

use crate::config::ProxyConfig;
use crate::observability::metrics;

pub use client::{ApsClient, Credentials};
pub use download::DownloadClient;

/// Errors raised by outbound calls.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport failure or non-2xx status.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("URL cannot carry a path: {0}")]
    BaseUrl(String),

    #[error("Invalid header name: {0}")]
    Header(String),

    /// The response decoded but lacked the expected fields.
    #[error("Unexpected response format: {0}")]
    Shape(String),
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Build the shared outbound client from configuration.
pub fn build_http_client(config: &ProxyConfig) -> UpstreamResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("aps-proxy/", env!("CARGO_PKG_VERSION")));

    if !config.upstream.system_proxy {
        builder = builder.no_proxy();
    }
    if let Some(timeout) = config.timeouts.upstream_connect() {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = config.timeouts.upstream_request() {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

/// Run an outbound call and record its outcome and latency.
pub(crate) async fn observed<T, F>(operation: &'static str, call: F) -> UpstreamResult<T>
where
    F: Future<Output = UpstreamResult<T>>,
{
    let start = Instant::now();
    let result = call.await;
    metrics::record_upstream(operation, result.is_ok(), start);
    if let Err(e) = &result {
        tracing::warn!(operation, error = %e, "Upstream call failed");
    }
    result
}
