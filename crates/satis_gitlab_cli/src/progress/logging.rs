use satis_gitlab::ScanProgress;
use satis_gitlab::manifest::Severity;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: ScanProgress) {
        match event {
            ScanProgress::ScanStarted {
                host,
                search,
                max_pages,
            } => {
                tracing::info!(max_pages, "Listing gitlab repositories from {}...", host);
                if let Some(search) = search {
                    tracing::info!("Project filter : {}...", search);
                }
            }

            ScanProgress::FetchingPage { page } => {
                tracing::debug!(page, "Fetching page");
            }

            ScanProgress::FetchedPage {
                page,
                count,
                processed_so_far,
            } => {
                tracing::debug!(page, count, processed_so_far, "Fetched page");
            }

            ScanProgress::ProjectRejected { project, reason } => {
                tracing::info!(reason = %reason, "Ignoring project {}", project.full_name);
            }

            ScanProgress::ProjectAccepted {
                project, package, ..
            } => {
                tracing::info!("{}", project.message(&format!("{}:*", package)));
            }

            ScanProgress::ProjectSkipped { project, error } => {
                if let Some(detail) = error.detail() {
                    tracing::debug!("{}", detail);
                }
                let message = project.message(&error.to_string());
                match error.severity() {
                    Severity::Error => tracing::error!("{}", message),
                    Severity::Warning => tracing::warn!("{}", message),
                }
            }

            ScanProgress::PageLimitReached { max_pages } => {
                tracing::warn!(max_pages, "Page limit reached, the listing may be incomplete");
            }

            ScanProgress::ScanComplete {
                accepted,
                processed,
                rejected,
                skipped,
            } => {
                tracing::info!(
                    processed,
                    rejected,
                    skipped,
                    "Number of project found : {}",
                    accepted
                );
            }

            ScanProgress::NoProjectFound { processed } => {
                tracing::error!(processed, "No project found!");
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
