//! Hub, project and top-folder listings.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::folders;
use crate::http::request::{require_param, BearerToken};
use crate::http::server::AppState;

pub async fn list_hubs(
    State(state): State<AppState>,
    token: BearerToken,
) -> ApiResult<Json<Vec<Value>>> {
    let hubs = state
        .aps
        .list_hubs(token.as_str())
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch hubs", e))?;

    tracing::info!(count = hubs.len(), "Fetched hubs");
    Ok(Json(hubs))
}

pub async fn list_projects(
    State(state): State<AppState>,
    token: BearerToken,
    Path(hub_id): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let hub_id = require_param(&hub_id, "Hub ID")?;

    let projects = state
        .aps
        .list_projects(token.as_str(), hub_id)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch projects", e))?;

    tracing::info!(hub_id, count = projects.len(), "Fetched projects");
    Ok(Json(projects))
}

/// Contents of the project's "Project Files" folder, or of every top-level
/// folder when there is none, as one flat list.
pub async fn top_folder_contents(
    State(state): State<AppState>,
    token: BearerToken,
    Path((hub_id, project_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Value>>> {
    let hub_id = require_param(&hub_id, "Hub ID")?;
    let project_id = require_param(&project_id, "Project ID")?;

    let top_folders = state
        .aps
        .list_top_folders(token.as_str(), hub_id, project_id)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch top-level folders", e))?;
    tracing::info!(hub_id, project_id, count = top_folders.len(), "Fetched top-level folders");

    let contents = folders::expand_contents(&state.aps, token.as_str(), project_id, &top_folders)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch folder contents", e))?;

    tracing::info!(project_id, items = contents.len(), "Resolved folder contents");
    Ok(Json(contents))
}

/// `/projects` without a hub was removed.
pub async fn deprecated_projects() -> ApiError {
    ApiError::Deprecated
}
