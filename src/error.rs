//! API error types.
//!
//! Every failure a handler can produce maps to one status code and a JSON
//! body of the form `{"message": ..., "error": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::upstream::UpstreamError;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable summary.
    pub message: String,
    /// Underlying cause, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Client ID and Client Secret are required")]
    MissingCredentials,

    #[error("Access token is required")]
    MissingToken,

    #[error("{0} is required")]
    MissingParameter(&'static str),

    #[error("API key is required")]
    MissingApiKey,

    #[error("This endpoint is deprecated. Please use /hubs/:hub_id/projects")]
    Deprecated,

    /// Outbound call failed (network or non-2xx). `context` is the
    /// route-specific summary shown to the caller.
    #[error("{context}")]
    Upstream {
        context: &'static str,
        detail: String,
    },

    #[error("Unexpected response format from Autodesk API")]
    UnexpectedShape { detail: String },
}

impl ApiError {
    /// Wrap an outbound failure, keeping shape mismatches distinct from
    /// transport and status failures.
    pub fn upstream(context: &'static str, err: UpstreamError) -> Self {
        match err {
            UpstreamError::Shape(detail) => Self::UnexpectedShape { detail },
            other => Self::Upstream {
                context,
                detail: error_chain(&other),
            },
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredentials | Self::MissingParameter(_) | Self::MissingApiKey => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingToken => StatusCode::UNAUTHORIZED,
            Self::Deprecated => StatusCode::NOT_FOUND,
            Self::Upstream { .. } | Self::UnexpectedShape { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            Self::Upstream { detail, .. } | Self::UnexpectedShape { detail } => {
                Some(detail.clone())
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = ?self.detail(), "{}", self);
        }
        let body = ErrorResponse {
            message: self.to_string(),
            error: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}

/// An error's message followed by each of its causes, separated by `: `.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.ends_with(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
