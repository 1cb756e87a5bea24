//! Project inclusion filters.
//!
//! Each filter decides whether a project belongs in the generated
//! configuration. Filters are combined in a [`FilterChain`], which accepts a
//! project only when every filter does.
//!
//! # Example
//!
//! ```ignore
//! use satis_gitlab::filter::{FilterChain, IgnoreRegexpFilter, IncludeIfHasFileFilter};
//!
//! let mut filters = FilterChain::new();
//! filters.add_filter(IgnoreRegexpFilter::new("^sandbox/")?);
//! filters.add_filter(IncludeIfHasFileFilter::new(client.clone(), ".satisinclude"));
//!
//! if filters.is_accepted(&project).await {
//!     // ...
//! }
//! ```

mod error;
mod ignore_regexp;
mod include_if_has_file;
mod namespace;
mod project_type;

use async_trait::async_trait;

use crate::platform::Project;

pub use error::FilterError;
pub use ignore_regexp::IgnoreRegexpFilter;
pub use include_if_has_file::IncludeIfHasFileFilter;
pub use namespace::GitlabNamespaceFilter;
pub use project_type::ProjectTypeFilter;

/// Outcome of evaluating one filter against one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDecision {
    pub accepted: bool,
    /// Human-readable reason, set on rejection.
    pub reason: Option<String>,
}

impl FilterDecision {
    pub fn accept() -> Self {
        Self {
            accepted: true,
            reason: None,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: Some(reason.into()),
        }
    }
}

/// A predicate over projects, possibly backed by network lookups.
#[async_trait]
pub trait ProjectFilter: Send + Sync {
    /// Short description used in logs ("ignore projects matching '^foo'").
    fn description(&self) -> String;

    async fn evaluate(&self, project: &Project) -> FilterDecision;

    async fn is_accepted(&self, project: &Project) -> bool {
        self.evaluate(project).await.accepted
    }
}

/// Ordered conjunction of filters.
///
/// Evaluation stops at the first rejection, so later (possibly expensive)
/// filters are not consulted. An empty chain accepts every project.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn ProjectFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(&mut self, filter: impl ProjectFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Descriptions of the registered filters, in evaluation order.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }

    /// Evaluate all filters in order, returning the first rejection.
    ///
    /// The reason of a rejection is prefixed with the rejecting filter's
    /// description.
    pub async fn evaluate(&self, project: &Project) -> FilterDecision {
        for filter in &self.filters {
            let decision = filter.evaluate(project).await;
            if !decision.accepted {
                let description = filter.description();
                let reason = match decision.reason {
                    Some(reason) => format!("{}: {}", description, reason),
                    None => description,
                };
                tracing::debug!(
                    project = %project.full_name,
                    reason = %reason,
                    "Project rejected by filter"
                );
                return FilterDecision::reject(reason);
            }
        }
        FilterDecision::accept()
    }

    pub async fn is_accepted(&self, project: &Project) -> bool {
        self.evaluate(project).await.accepted
    }
}
