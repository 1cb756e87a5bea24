use async_trait::async_trait;

use super::error::FilterError;
use super::{FilterDecision, ProjectFilter};
use crate::platform::Project;

/// Accepts only projects whose namespace is in an allow-list.
///
/// The list is comma-separated and may mix numeric namespace ids and
/// namespace names, e.g. `"2,Diaspora"`. Matching is exact.
#[derive(Debug, Clone)]
pub struct GitlabNamespaceFilter {
    namespaces: Vec<String>,
}

impl GitlabNamespaceFilter {
    pub fn new(namespaces: &str) -> Result<Self, FilterError> {
        let parsed: Vec<String> = namespaces
            .split(',')
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
            .map(str::to_string)
            .collect();

        if parsed.is_empty() {
            return Err(FilterError::EmptyNamespaceList(namespaces.to_string()));
        }
        Ok(Self { namespaces: parsed })
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }
}

#[async_trait]
impl ProjectFilter for GitlabNamespaceFilter {
    fn description(&self) -> String {
        format!("gitlab namespace in [{}]", self.namespaces.join(","))
    }

    async fn evaluate(&self, project: &Project) -> FilterDecision {
        let id = project.namespace.id.to_string();
        let allowed = self
            .namespaces
            .iter()
            .any(|ns| *ns == id || *ns == project.namespace.name);

        if allowed {
            FilterDecision::accept()
        } else {
            FilterDecision::reject(format!(
                "namespace '{}' (id {}) not allowed",
                project.namespace.name, project.namespace.id
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Namespace;

    fn project(namespace_id: u64, namespace_name: &str) -> Project {
        Project {
            full_name: format!("{}/project", namespace_name.to_lowercase()),
            namespace: Namespace {
                id: namespace_id,
                name: namespace_name.to_string(),
                full_path: namespace_name.to_lowercase(),
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_accepts_id_or_name() {
        let filter = GitlabNamespaceFilter::new("2,Diaspora").expect("valid list");
        assert!(filter.is_accepted(&project(2, "Acme")).await);
        assert!(filter.is_accepted(&project(9, "Diaspora")).await);
        assert!(!filter.is_accepted(&project(3, "Other")).await);
    }

    #[tokio::test]
    async fn test_name_match_is_case_sensitive() {
        let filter = GitlabNamespaceFilter::new("Diaspora").expect("valid list");
        assert!(!filter.is_accepted(&project(9, "diaspora")).await);
    }

    #[test]
    fn test_list_is_trimmed() {
        let filter = GitlabNamespaceFilter::new(" 2 , Diaspora,,").expect("valid list");
        assert_eq!(filter.namespaces(), ["2", "Diaspora"]);
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let err = GitlabNamespaceFilter::new(" , ").expect_err("no namespace");
        assert!(matches!(err, FilterError::EmptyNamespaceList(_)));
    }
}
