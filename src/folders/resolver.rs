//! Folder expansion planning and content annotation.
//!
//! # Responsibilities
//! - Pick the folder(s) whose contents a top-folder request returns
//! - Annotate content items with a derived `folderId`
//!
//! # Design Decisions
//! - First "Project Files" match wins; later duplicates are ignored
//! - No match degrades to every top-level folder, in listing order
//! - Pure functions over `serde_json::Value`; no I/O here

use serde_json::Value;

use crate::upstream::{UpstreamError, UpstreamResult};

/// Display name of the conventional user-content folder.
pub const PROJECT_FILES: &str = "Project Files";

/// `type` value the upstream uses for folder entries.
pub const FOLDER_TYPE: &str = "folders";

/// Which top-level folders to expand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// The "Project Files" folder was found.
    ProjectFiles(String),
    /// No "Project Files" folder; expand everything.
    AllTopFolders(Vec<String>),
}

impl Expansion {
    pub fn folder_ids(&self) -> &[String] {
        match self {
            Self::ProjectFiles(id) => std::slice::from_ref(id),
            Self::AllTopFolders(ids) => ids,
        }
    }
}

fn display_name(folder: &Value) -> Option<&str> {
    folder.pointer("/attributes/displayName").and_then(Value::as_str)
}

fn folder_id(folder: &Value) -> UpstreamResult<String> {
    folder
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| UpstreamError::Shape("top-level folder without a string id".to_string()))
}

/// Decide which of the given top-level folders to expand.
pub fn plan_expansion(top_folders: &[Value]) -> UpstreamResult<Expansion> {
    if let Some(folder) = top_folders
        .iter()
        .find(|f| display_name(f) == Some(PROJECT_FILES))
    {
        return folder_id(folder).map(Expansion::ProjectFiles);
    }

    top_folders
        .iter()
        .map(folder_id)
        .collect::<UpstreamResult<Vec<_>>>()
        .map(Expansion::AllTopFolders)
}

/// Set `folderId` to the item's own id for folders, `null` otherwise.
/// Non-object items pass through untouched.
pub fn annotate_item(mut item: Value) -> Value {
    if let Value::Object(fields) = &mut item {
        let folder_id = match (fields.get("type").and_then(Value::as_str), fields.get("id")) {
            (Some(FOLDER_TYPE), Some(id)) => id.clone(),
            _ => Value::Null,
        };
        fields.insert("folderId".to_string(), folder_id);
    }
    item
}
