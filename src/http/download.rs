//! `POST /proxy/download`: forward to the internal download service.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::http::request::json_object;
use crate::http::response::relay;
use crate::http::server::AppState;

const API_KEY_FIELD: &str = "api_key";
const FAILURE: &str = "Failed to proxy download request";

pub async fn proxy_download(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    let mut params = json_object(&body);
    let api_key = match params.remove(API_KEY_FIELD) {
        Some(Value::String(key)) if !key.is_empty() => key,
        _ => return Err(ApiError::MissingApiKey),
    };

    tracing::info!(fields = params.len(), "Proxying download request");

    let upstream = state
        .download
        .forward(&api_key, &params)
        .await
        .map_err(|e| ApiError::upstream(FAILURE, e))?;

    let status = upstream.status();
    let response = relay(upstream)
        .await
        .map_err(|e| ApiError::upstream(FAILURE, e.without_url().into()))?;

    tracing::info!(status = %status, "Download service responded");
    Ok(response)
}
