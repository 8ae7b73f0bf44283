//! Request inspection and validation.
//!
//! # Responsibilities
//! - Read the request ID assigned by the request-id layer
//! - Extract the bearer token from the Authorization header
//! - Validate path parameters and lenient JSON bodies
//!
//! # Design Decisions
//! - The token is the second word of the header; the scheme is not checked
//! - Bodies that are absent or not JSON objects read as empty objects, so
//!   the handler reports the missing field rather than a parse error

use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts, Request};
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Access to the request ID set by `SetRequestIdLayer`.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }
}

/// Token from `Authorization: <scheme> <token>`.
pub fn parse_bearer(header: &str) -> Option<&str> {
    header.split_whitespace().nth(1)
}

/// Caller's bearer token, forwarded as-is to the upstream API.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_bearer)
            .map(|token| Self(token.to_string()))
            .ok_or(ApiError::MissingToken)
    }
}

/// Reject blank path parameters.
pub fn require_param<'a>(value: &'a str, name: &'static str) -> ApiResult<&'a str> {
    if value.trim().is_empty() {
        Err(ApiError::MissingParameter(name))
    } else {
        Ok(value)
    }
}

/// Parse a body as a JSON object.
pub fn json_object(body: &[u8]) -> Map<String, Value> {
    serde_json::from_slice(body).unwrap_or_default()
}

/// Non-empty string field of a JSON object.
pub fn string_field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
