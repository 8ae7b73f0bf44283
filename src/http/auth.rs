//! `POST /auth`: client-credentials exchange.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::http::request::{json_object, string_field};
use crate::http::server::AppState;
use crate::upstream::Credentials;

pub async fn authenticate(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Value>> {
    let fields = json_object(&body);
    let credentials = match (
        string_field(&fields, "clientId"),
        string_field(&fields, "clientSecret"),
    ) {
        (Some(id), Some(secret)) => Credentials::new(id, secret),
        _ => None,
    }
    .ok_or(ApiError::MissingCredentials)?;

    let token = state
        .aps
        .exchange_client_credentials(&credentials)
        .await
        .map_err(|e| ApiError::upstream("Authentication failed", e))?;

    tracing::info!(client_id = %credentials.client_id, "Authentication successful");
    Ok(Json(token))
}
