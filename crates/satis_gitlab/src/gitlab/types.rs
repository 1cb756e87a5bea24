//! GitLab API data types.

use serde::Deserialize;

/// GitLab project - fields we need from the `/projects` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabProject {
    /// Project ID.
    pub id: u64,
    /// Project name.
    pub name: String,
    /// Full path including namespace (e.g., "group/subgroup/project").
    pub path_with_namespace: String,
    /// Default branch name (null for empty repositories).
    #[serde(default)]
    pub default_branch: Option<String>,
    /// Namespace information.
    pub namespace: GitLabNamespace,
    /// Web URL to the project.
    #[serde(default)]
    pub web_url: String,
    /// HTTP clone URL.
    #[serde(default)]
    pub http_url_to_repo: Option<String>,
}

/// GitLab namespace (group or user).
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabNamespace {
    /// Namespace ID.
    pub id: u64,
    /// Namespace name.
    pub name: String,
    /// Full path (e.g., "group/subgroup").
    #[serde(default)]
    pub full_path: String,
}
