use std::sync::Arc;

use async_trait::async_trait;

use super::{FilterDecision, ProjectFilter};
use crate::platform::{Project, RepositoryClient, short_error_message};

/// Accepts only projects holding a given file on their default branch.
///
/// Uses [`RepositoryClient::file_exists`], so the file is never downloaded.
pub struct IncludeIfHasFileFilter {
    client: Arc<dyn RepositoryClient>,
    file_path: String,
}

impl IncludeIfHasFileFilter {
    pub fn new(client: Arc<dyn RepositoryClient>, file_path: impl Into<String>) -> Self {
        Self {
            client,
            file_path: file_path.into(),
        }
    }
}

#[async_trait]
impl ProjectFilter for IncludeIfHasFileFilter {
    fn description(&self) -> String {
        format!("include if has file '{}'", self.file_path)
    }

    async fn evaluate(&self, project: &Project) -> FilterDecision {
        let Some(branch) = project.default_branch.as_deref() else {
            return FilterDecision::reject("no default branch");
        };

        match self.client.file_exists(project, &self.file_path, branch).await {
            Ok(true) => FilterDecision::accept(),
            Ok(false) => FilterDecision::reject(format!("{} not found", self.file_path)),
            Err(e) => {
                tracing::debug!(
                    project = %project.full_name,
                    error = %e,
                    "File lookup failed"
                );
                FilterDecision::reject(format!(
                    "could not check {}: {}",
                    self.file_path,
                    short_error_message(&e)
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubClient;

    fn project(branch: Option<&str>) -> Project {
        Project {
            id: 1,
            full_name: "acme/widget".to_string(),
            default_branch: branch.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_accepts_when_file_exists() {
        let client = Arc::new(StubClient::default().with_existing_file(".satisinclude"));
        let filter = IncludeIfHasFileFilter::new(client.clone(), ".satisinclude");

        assert!(filter.is_accepted(&project(Some("main"))).await);
        assert_eq!(client.exists_calls(), vec![(".satisinclude".to_string(), "main".to_string())]);
        assert_eq!(client.raw_file_calls(), 0);
    }

    #[tokio::test]
    async fn test_rejects_when_file_is_absent() {
        let client = Arc::new(StubClient::default());
        let filter = IncludeIfHasFileFilter::new(client, ".satisinclude");

        let decision = filter.evaluate(&project(Some("main"))).await;
        assert!(!decision.accepted);
        assert_eq!(decision.reason.as_deref(), Some(".satisinclude not found"));
    }

    #[tokio::test]
    async fn test_rejects_without_default_branch() {
        let client = Arc::new(StubClient::default().with_existing_file(".satisinclude"));
        let filter = IncludeIfHasFileFilter::new(client.clone(), ".satisinclude");

        assert!(!filter.is_accepted(&project(None)).await);
        assert!(client.exists_calls().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_on_lookup_failure() {
        let client = Arc::new(StubClient::default().failing());
        let filter = IncludeIfHasFileFilter::new(client, ".satisinclude");

        let decision = filter.evaluate(&project(Some("main"))).await;
        assert!(!decision.accepted);
        assert!(
            decision
                .reason
                .as_deref()
                .is_some_and(|r| r.starts_with("could not check .satisinclude"))
        );
    }
}
