//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware stack)
//!     → request.rs (request ID, bearer token, body/param validation)
//!     → auth.rs / hubs.rs / download.rs (route handlers)
//!     → upstream (outbound calls)
//!     → response.rs (relay of forwarded responses)
//!     → Send to client
//! ```

pub mod auth;
pub mod download;
pub mod hubs;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{BearerToken, RequestIdExt, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
