//! `composer.json` retrieval and package name extraction.

use serde::Deserialize;
use thiserror::Error;

use crate::platform::{Project, RepositoryClient, short_error_message};

/// Manifest file looked up on each project's default branch.
pub const MANIFEST_PATH: &str = "composer.json";

/// The fields of `composer.json` this tool reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComposerManifest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "string_or_none")]
    pub package_type: Option<String>,
}

/// Non-string values are treated as absent rather than as a parse error.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Why a project produced no package.
///
/// None of these abort a scan; the project is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("composer.json not found")]
    Missing,

    #[error("composer.json could not be fetched")]
    Unreachable(String),

    #[error("composer.json is not valid JSON")]
    Malformed(String),

    #[error("name not defined in composer.json")]
    NameMissing,
}

/// How loudly a skipped project should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl ManifestError {
    /// A missing name is a data-quality problem in a project that otherwise
    /// looks like a package; everything else is an ordinary skip.
    pub fn severity(&self) -> Severity {
        match self {
            Self::NameMissing => Severity::Error,
            Self::Missing | Self::Unreachable(_) | Self::Malformed(_) => Severity::Warning,
        }
    }

    /// Underlying error detail, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unreachable(detail) | Self::Malformed(detail) => Some(detail),
            Self::Missing | Self::NameMissing => None,
        }
    }
}

/// Fetch and parse a project's `composer.json` from its default branch.
pub async fn fetch_manifest(
    client: &dyn RepositoryClient,
    project: &Project,
) -> Result<ComposerManifest, ManifestError> {
    let Some(branch) = project.default_branch.as_deref() else {
        return Err(ManifestError::Missing);
    };

    let raw = client
        .get_raw_file(project, MANIFEST_PATH, branch)
        .await
        .map_err(|e| {
            if e.is_file_not_found() {
                ManifestError::Missing
            } else {
                ManifestError::Unreachable(short_error_message(&e))
            }
        })?;

    parse_manifest(&raw)
}

/// Parse manifest bytes.
pub fn parse_manifest(raw: &[u8]) -> Result<ComposerManifest, ManifestError> {
    let value: serde_json::Value =
        serde_json::from_slice(raw).map_err(|e| ManifestError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(ManifestError::Malformed(
            "expected a JSON object at top level".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| ManifestError::Malformed(e.to_string()))
}

/// Extracts declared package names from project manifests.
pub struct ManifestExtractor<'a> {
    client: &'a dyn RepositoryClient,
}

impl<'a> ManifestExtractor<'a> {
    pub fn new(client: &'a dyn RepositoryClient) -> Self {
        Self { client }
    }

    /// Return the package name declared by the project's `composer.json`.
    pub async fn extract(&self, project: &Project) -> Result<String, ManifestError> {
        let manifest = fetch_manifest(self.client, project).await?;
        manifest
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(ManifestError::NameMissing)
    }
}
