//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, route, status
//! - `proxy_request_duration_seconds` (histogram): handler latency by route
//! - `proxy_upstream_calls_total` (counter): outbound calls by operation, outcome
//! - `proxy_upstream_duration_seconds` (histogram): outbound latency by operation
//!
//! # Design Decisions
//! - Routes are labelled by matched pattern, not raw path (bounded cardinality)
//! - Without an installed exporter every call is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one served request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "proxy_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one outbound call.
pub fn record_upstream(operation: &'static str, success: bool, start: Instant) {
    let outcome = if success { "ok" } else { "error" };
    counter!(
        "proxy_upstream_calls_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    histogram!("proxy_upstream_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}
