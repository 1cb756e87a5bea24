//! Platform-agnostic project model and client trait.
//!
//! The scan only talks to a [`RepositoryClient`]; the GitLab implementation
//! lives in [`crate::gitlab`].

mod errors;
mod types;

pub use errors::{PlatformError, Result, short_error_message};
pub use types::{ClientOptions, FindOptions, Namespace, Project, RepositoryClient};
