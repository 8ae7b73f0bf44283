//! Top-folder content resolution.
//!
//! # Data Flow
//! ```text
//! top-level folders (upstream listing)
//!     → resolver.rs (plan: "Project Files" or every folder)
//!     → per-folder contents, fetched one after another
//!     → resolver.rs (annotate folderId)
//!     → one flat list, in fetch order
//! ```
//!
//! # Design Decisions
//! - Sequential fetches; latency grows with the number of folders expanded
//! - Any failed fetch discards everything gathered so far

pub mod resolver;

use serde_json::Value;

use crate::upstream::{ApsClient, UpstreamResult};

pub use resolver::{annotate_item, plan_expansion, Expansion, FOLDER_TYPE, PROJECT_FILES};

/// Expand the planned folders of a project into one annotated content list.
pub async fn expand_contents(
    client: &ApsClient,
    token: &str,
    project_id: &str,
    top_folders: &[Value],
) -> UpstreamResult<Vec<Value>> {
    let plan = plan_expansion(top_folders)?;
    match &plan {
        Expansion::ProjectFiles(id) => {
            tracing::info!(project_id, folder_id = %id, "Expanding Project Files folder");
        }
        Expansion::AllTopFolders(ids) => {
            tracing::warn!(
                project_id,
                folders = ids.len(),
                "No Project Files folder found, expanding every top-level folder"
            );
        }
    }

    let mut contents = Vec::new();
    for folder_id in plan.folder_ids() {
        let items = client
            .list_folder_contents(token, project_id, folder_id)
            .await?;
        tracing::debug!(folder_id = %folder_id, items = items.len(), "Fetched folder contents");
        contents.extend(items.into_iter().map(annotate_item));
    }

    Ok(contents)
}
