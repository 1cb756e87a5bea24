use async_trait::async_trait;
use regex::Regex;

use super::error::FilterError;
use super::{FilterDecision, ProjectFilter};
use crate::platform::Project;

/// Rejects projects whose qualified name matches a regular expression.
#[derive(Debug, Clone)]
pub struct IgnoreRegexpFilter {
    pattern: Regex,
}

impl IgnoreRegexpFilter {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        let pattern = Regex::new(pattern).map_err(|source| FilterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }
}

#[async_trait]
impl ProjectFilter for IgnoreRegexpFilter {
    fn description(&self) -> String {
        format!("ignore projects matching '{}'", self.pattern.as_str())
    }

    async fn evaluate(&self, project: &Project) -> FilterDecision {
        if self.pattern.is_match(&project.full_name) {
            FilterDecision::reject(format!(
                "name matches ignore pattern '{}'",
                self.pattern.as_str()
            ))
        } else {
            FilterDecision::accept()
        }
    }
}
