//! APS proxy library.
//!
//! Authenticates against the Autodesk Platform Services API with the
//! client-credentials flow, forwards hub/project/folder reads, and relays
//! download requests to an internal service.

pub mod config;
pub mod error;
pub mod folders;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::{ApiError, ApiResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
