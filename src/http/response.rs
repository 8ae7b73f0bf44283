//! Response relaying.
//!
//! # Responsibilities
//! - Turn a forwarded service's response into the client response
//!
//! # Design Decisions
//! - Status, Content-Type and body bytes pass through unchanged
//! - Error statuses are relayed the same way as successes
//! - Other upstream headers are dropped

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

/// Relay a forwarded response verbatim.
pub async fn relay(upstream: reqwest::Response) -> Result<Response, reqwest::Error> {
    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let body = upstream.bytes().await?;

    let mut response = (status, body).into_response();
    match content_type {
        Some(content_type) => {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    Ok(response)
}
