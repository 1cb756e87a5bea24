//! GitLab API client for project discovery.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitLab API operations
//! - [`types`] - Response structures for the `/projects` endpoint
//! - [`client`] - The [`GitLabClient`], implementing [`RepositoryClient`]
//! - [`convert`] - Conversion to the platform-agnostic [`Project`]
//!
//! [`RepositoryClient`]: crate::platform::RepositoryClient
//! [`Project`]: crate::platform::Project

mod client;
mod convert;
mod error;
mod types;

pub use client::{GitLabClient, PAGE_SIZE};
pub use convert::to_project;
pub use error::GitLabError;
pub use types::{GitLabNamespace, GitLabProject};
