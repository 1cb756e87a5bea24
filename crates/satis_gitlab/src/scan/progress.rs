//! Progress events emitted while scanning.

use crate::manifest::ManifestError;
use crate::platform::Project;

/// Progress events emitted during a scan.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ScanProgress {
    /// The scan is about to request the first page.
    ScanStarted {
        /// Instance being scanned.
        host: String,
        /// Listing search query, if any.
        search: Option<String>,
        /// Page cap for this scan.
        max_pages: u32,
    },

    /// Requesting a listing page.
    FetchingPage {
        /// Page number (1-indexed).
        page: u32,
    },

    /// A non-empty listing page arrived.
    FetchedPage {
        page: u32,
        /// Projects on this page.
        count: usize,
        /// Running total of projects seen.
        processed_so_far: usize,
    },

    /// A filter rejected the project.
    ProjectRejected {
        project: Project,
        /// Rejecting filter and its reason.
        reason: String,
    },

    /// The project was written to the sink.
    ProjectAccepted {
        project: Project,
        /// Package name from `composer.json`.
        package: String,
        /// Running total of accepted projects.
        accepted_so_far: usize,
    },

    /// The project passed the filters but has no usable manifest.
    ProjectSkipped {
        project: Project,
        error: ManifestError,
    },

    /// The page cap was hit before the listing was exhausted.
    PageLimitReached { max_pages: u32 },

    /// The scan finished with at least one accepted project.
    ScanComplete {
        accepted: usize,
        processed: usize,
        rejected: usize,
        skipped: usize,
    },

    /// The scan finished without accepting any project.
    NoProjectFound {
        /// Projects seen in the listing.
        processed: usize,
    },
}

/// Callback for progress updates during a scan.
pub type ProgressCallback = Box<dyn Fn(ScanProgress) + Send + Sync>;

/// Emit a progress event if a callback is provided.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: ScanProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
