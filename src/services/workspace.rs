// Workspace settings service.

use serde::Deserialize;

use crate::error::CoreError;
use crate::state::AppState;
use crate::types::WorkspaceSettings;
use crate::util::{validate_bounded_string, validate_url_slug};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkspaceRequest {
    pub name: String,
    pub url_slug: String,
}

/// Update the workspace name and URL slug.
pub fn update_workspace(
    state: &AppState,
    request: UpdateWorkspaceRequest,
) -> Result<WorkspaceSettings, CoreError> {
    let name = validate_bounded_string(&request.name, "name", 1, 80)?;
    let url_slug = validate_url_slug(&request.url_slug, "urlSlug")?;

    let mut workspace = state.workspace.lock().map_err(|_| CoreError::LockPoisoned)?;
    workspace.name = name;
    workspace.url_slug = url_slug;
    Ok(workspace.clone())
}
