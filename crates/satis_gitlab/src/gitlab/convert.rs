//! GitLab model conversion.

use super::types::GitLabProject;
use crate::platform::{Namespace, Project};

/// Convert a GitLab project into the platform-agnostic snapshot.
///
/// GitLab has no notion of a project type; `project_type` stays empty and
/// type filters fall back to the manifest.
pub fn to_project(project: &GitLabProject) -> Project {
    let http_url = project
        .http_url_to_repo
        .clone()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| format!("{}.git", project.web_url));

    Project {
        id: project.id,
        name: project.name.clone(),
        full_name: project.path_with_namespace.clone(),
        namespace: Namespace {
            id: project.namespace.id,
            name: project.namespace.name.clone(),
            full_path: project.namespace.full_path.clone(),
        },
        http_url,
        default_branch: project
            .default_branch
            .clone()
            .filter(|branch| !branch.is_empty()),
        project_type: None,
    }
}
