use std::sync::Arc;

use async_trait::async_trait;

use super::{FilterDecision, ProjectFilter};
use crate::manifest::fetch_manifest;
use crate::platform::{Project, RepositoryClient};

/// Accepts only projects of a given type (e.g. "library").
///
/// Matching is exact and case-sensitive. The type comes from the project
/// snapshot when the platform provides one, otherwise from the `type` field
/// of the project's `composer.json`.
pub struct ProjectTypeFilter {
    project_type: String,
    client: Arc<dyn RepositoryClient>,
}

impl ProjectTypeFilter {
    pub fn new(project_type: impl Into<String>, client: Arc<dyn RepositoryClient>) -> Self {
        Self {
            project_type: project_type.into(),
            client,
        }
    }

    fn decide(&self, declared: Option<&str>) -> FilterDecision {
        match declared {
            Some(t) if t == self.project_type => FilterDecision::accept(),
            Some(t) => FilterDecision::reject(format!(
                "type '{}' is not '{}'",
                t, self.project_type
            )),
            None => FilterDecision::reject("type not defined"),
        }
    }
}

#[async_trait]
impl ProjectFilter for ProjectTypeFilter {
    fn description(&self) -> String {
        format!("project type '{}'", self.project_type)
    }

    async fn evaluate(&self, project: &Project) -> FilterDecision {
        if let Some(declared) = project.project_type.as_deref() {
            return self.decide(Some(declared));
        }

        match fetch_manifest(self.client.as_ref(), project).await {
            Ok(manifest) => self.decide(manifest.package_type.as_deref()),
            Err(e) => FilterDecision::reject(e.to_string()),
        }
    }
}
