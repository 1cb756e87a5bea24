//! satis-gitlab - SATIS configuration from GitLab projects.
//!
//! This library walks the project listing of a GitLab instance, keeps the
//! projects accepted by a chain of filters, reads the package name from each
//! project's `composer.json` and writes one VCS repository per package into a
//! SATIS `satis.json`.
//!
//! # Features
//!
//! - `gitlab` (default) - The reqwest-backed [`gitlab::GitLabClient`].
//!
//! # Example
//!
//! ```ignore
//! use satis_gitlab::{ClientOptions, FilterChain, SatisConfigBuilder, ScanOptions, scan_projects};
//! use satis_gitlab::gitlab::GitLabClient;
//!
//! let options = ClientOptions::new("https://gitlab.example.com").with_token(token);
//! let client = GitLabClient::new(&options)?;
//! let mut builder = SatisConfigBuilder::new()?;
//!
//! let result = scan_projects(
//!     &client,
//!     &FilterChain::new(),
//!     &mut builder,
//!     &ScanOptions::for_client(&options),
//!     None,
//! )
//! .await?;
//! builder.write_to("satis.json".as_ref())?;
//! ```

pub mod filter;
pub mod http;
pub mod manifest;
pub mod platform;
pub mod satis;
pub mod scan;

#[cfg(feature = "gitlab")]
pub mod gitlab;

#[cfg(test)]
pub(crate) mod testing;

pub use filter::{FilterChain, FilterDecision, FilterError, ProjectFilter};
pub use manifest::{ManifestError, ManifestExtractor};
pub use platform::{ClientOptions, PlatformError, Project, RepositoryClient};
pub use satis::{SatisConfigBuilder, SatisConfigError};
pub use scan::{
    MAX_PAGES, ProgressCallback, RepositorySink, ScanError, ScanOptions, ScanProgress, ScanResult,
    scan_projects,
};
