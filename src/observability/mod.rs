//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, console + optional file)
//!     → metrics.rs (request and upstream counters/histograms)
//!
//! Consumers:
//!     → stdout / {log_dir}/{log_file}
//!     → Metrics endpoint (Prometheus scrape), when enabled
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - Metrics are cheap no-ops when no exporter is installed
//! - Secrets and bearer tokens never reach a log line

pub mod logging;
pub mod metrics;
