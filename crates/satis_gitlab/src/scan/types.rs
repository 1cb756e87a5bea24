//! Scan options, results and errors.

use thiserror::Error;

use crate::platform::{ClientOptions, PlatformError};

/// Upper bound on listing pages fetched in one scan.
pub const MAX_PAGES: u32 = 10_000;

/// Options for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Search query passed to the listing.
    pub search: Option<String>,
    /// Stop after this many pages even if the listing is not exhausted.
    pub max_pages: u32,
    /// Forwarded to the sink with every accepted repository.
    pub unsafe_ssl: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            search: None,
            max_pages: MAX_PAGES,
            unsafe_ssl: false,
        }
    }
}

impl ScanOptions {
    /// Options inheriting the client's TLS setting.
    pub fn for_client(client: &ClientOptions) -> Self {
        Self {
            unsafe_ssl: client.unsafe_ssl,
            ..Self::default()
        }
    }

    /// Set the search query. Blank queries are ignored.
    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.trim().is_empty());
        self
    }

    /// Set the page cap. At least one page is always fetched.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }
}

/// Counters for a finished scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Projects written to the sink.
    pub accepted: usize,
    /// Projects seen in the listing.
    pub processed: usize,
    /// Projects rejected by a filter.
    pub rejected: usize,
    /// Projects accepted by the filters but without a usable manifest.
    pub skipped: usize,
    /// Listing pages that returned projects.
    pub pages: u32,
    /// The scan stopped at `max_pages` instead of an empty page.
    pub page_limit_reached: bool,
}

impl ScanResult {
    pub fn no_project_found(&self) -> bool {
        self.accepted == 0
    }
}

/// Fatal scan errors. Per-project problems never surface here.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to list projects (page {page}): {source}")]
    Listing {
        page: u32,
        #[source]
        source: PlatformError,
    },
}

/// Destination for accepted repositories.
pub trait RepositorySink {
    fn add_repository(&mut self, name: &str, url: &str, unsafe_ssl: bool);
}

/// Collects `(name, url)` pairs in discovery order.
impl RepositorySink for Vec<(String, String)> {
    fn add_repository(&mut self, name: &str, url: &str, _unsafe_ssl: bool) {
        self.push((name.to_string(), url.to_string()));
    }
}
