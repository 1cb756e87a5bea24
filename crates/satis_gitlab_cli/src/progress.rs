//! Progress reporting for scans.
//!
//! This module provides two modes of progress reporting:
//! - Interactive mode (TTY): a spinner using indicatif, with per-project
//!   warnings printed above it
//! - Logging mode (non-TTY): structured logging using tracing

mod interactive;
mod logging;

use std::sync::Arc;

use console::Term;
use satis_gitlab::{ProgressCallback, ScanProgress};

pub use interactive::InteractiveReporter;
pub use logging::LoggingReporter;

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Interactive spinner for TTY.
    Interactive(InteractiveReporter),
    /// Structured logging for non-TTY (CI, pipes).
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub fn new() -> Self {
        if Term::stdout().is_term() {
            Self::Interactive(InteractiveReporter::new())
        } else {
            Self::Logging(LoggingReporter::new())
        }
    }

    /// Handle a progress event.
    pub fn handle(&self, event: ScanProgress) {
        match self {
            Self::Interactive(r) => r.handle(event),
            Self::Logging(r) => r.handle(event),
        }
    }

    /// Convert to a ProgressCallback for the library.
    pub fn as_callback(self: &Arc<Self>) -> ProgressCallback {
        let reporter = Arc::clone(self);
        Box::new(move |event| {
            reporter.handle(event);
        })
    }

    /// Print a line without corrupting the spinner.
    pub fn println(&self, message: &str) {
        match self {
            Self::Interactive(r) => r.println(message),
            Self::Logging(_) => tracing::info!("{}", message),
        }
    }

    /// Print a warning line, at warn level in logging mode.
    pub fn warn(&self, message: &str) {
        match self {
            Self::Interactive(r) => r.println(&format!("⚠ {}", message)),
            Self::Logging(_) => tracing::warn!("{}", message),
        }
    }

    /// Finish the spinner (interactive mode only).
    pub fn finish(&self) {
        if let Self::Interactive(r) = self {
            r.finish();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_callback_handles_events() {
        let reporter = Arc::new(ProgressReporter::Logging(LoggingReporter::new()));
        let callback = reporter.as_callback();
        callback(ScanProgress::FetchingPage { page: 1 });
        callback(ScanProgress::NoProjectFound { processed: 0 });
        reporter.finish();
    }

    #[test]
    fn test_notices_do_not_touch_spinner() {
        let reporter = ProgressReporter::Interactive(InteractiveReporter::hidden());
        reporter.println("Loading template satis.json...");
        reporter.warn("Could not determine the GitLab domain");
        match &reporter {
            ProgressReporter::Interactive(r) => assert_eq!(r.accepted(), 0),
            ProgressReporter::Logging(_) => unreachable!(),
        }
        reporter.finish();
    }

    #[test]
    fn test_interactive_callback_counts_accepted() {
        let reporter = Arc::new(ProgressReporter::Interactive(InteractiveReporter::hidden()));
        let callback = reporter.as_callback();
        callback(ScanProgress::ProjectAccepted {
            project: Default::default(),
            package: "acme/widget".to_string(),
            accepted_so_far: 1,
        });

        match reporter.as_ref() {
            ProgressReporter::Interactive(r) => {
                assert_eq!(r.accepted(), 1);
            }
            ProgressReporter::Logging(_) => unreachable!(),
        }
        reporter.finish();
    }
}
