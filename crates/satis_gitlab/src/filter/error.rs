//! Filter construction errors.

use thiserror::Error;

/// Errors raised while building filters from user input.
///
/// These are fatal: they happen before any project is listed.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("namespace list '{0}' contains no namespace")]
    EmptyNamespaceList(String),
}
