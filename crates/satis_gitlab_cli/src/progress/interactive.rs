use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use satis_gitlab::ScanProgress;
use satis_gitlab::manifest::Severity;

/// Interactive progress reporter using indicatif.
///
/// A single spinner tracks pages and projects; accepted and skipped projects
/// are printed above it.
pub struct InteractiveReporter {
    multi: MultiProgress,
    bar: ProgressBar,
    accepted: AtomicUsize,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        let multi = MultiProgress::new();
        let bar = multi.add(ProgressBar::new_spinner());
        bar.set_style(Self::counter_style());
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        Self::with_bar(multi, bar)
    }

    #[cfg(test)]
    pub fn hidden() -> Self {
        let multi = MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden());
        let bar = multi.add(ProgressBar::new_spinner());
        Self::with_bar(multi, bar)
    }

    fn with_bar(multi: MultiProgress, bar: ProgressBar) -> Self {
        Self {
            multi,
            bar,
            accepted: AtomicUsize::new(0),
        }
    }

    /// Projects accepted so far.
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    pub fn handle(&self, event: ScanProgress) {
        match event {
            ScanProgress::ScanStarted { host, search, .. } => {
                self.bar.set_prefix(host);
                let msg = match search {
                    Some(search) => format!("Listing projects matching '{}'...", search),
                    None => "Listing projects...".to_string(),
                };
                self.bar.set_message(msg);
            }

            ScanProgress::FetchingPage { page } => {
                self.bar.set_message(format!(
                    "projects, page {} ({} accepted)",
                    page,
                    self.accepted()
                ));
            }

            ScanProgress::FetchedPage {
                processed_so_far, ..
            } => {
                self.bar.set_position(processed_so_far as u64);
            }

            ScanProgress::ProjectAccepted {
                project, package, ..
            } => {
                self.accepted.fetch_add(1, Ordering::SeqCst);
                self.println(&format!("✓ {}", project.message(&format!("{}:*", package))));
            }

            ScanProgress::ProjectSkipped { project, error } => {
                let marker = match error.severity() {
                    Severity::Error => "✗",
                    Severity::Warning => "⚠",
                };
                self.println(&format!("{} {}", marker, project.message(&error.to_string())));
            }

            ScanProgress::PageLimitReached { max_pages } => {
                self.println(&format!(
                    "⚠ Stopped after {} pages, the listing may be incomplete",
                    max_pages
                ));
            }

            ScanProgress::ScanComplete {
                accepted,
                rejected,
                skipped,
                ..
            } => {
                self.bar.finish_with_message(format!(
                    "Number of project found : {} ({} ignored, {} without package)",
                    accepted, rejected, skipped
                ));
            }

            ScanProgress::NoProjectFound { .. } => {
                self.bar.abandon_with_message("No project found!");
            }

            _ => {}
        }
    }

    pub fn println(&self, message: &str) {
        self.multi.println(message).ok();
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish();
        }
    }

    fn counter_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.green} {pos:>4} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use satis_gitlab::{ManifestError, Project};

    use super::*;

    fn project() -> Project {
        Project {
            full_name: "acme/widget".to_string(),
            default_branch: Some("main".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_counts_accepted_projects_only() {
        let reporter = InteractiveReporter::hidden();
        reporter.handle(ScanProgress::ProjectAccepted {
            project: project(),
            package: "acme/widget".to_string(),
            accepted_so_far: 1,
        });
        reporter.handle(ScanProgress::ProjectSkipped {
            project: project(),
            error: ManifestError::Missing,
        });
        reporter.handle(ScanProgress::ProjectRejected {
            project: project(),
            reason: "ignored".to_string(),
        });

        assert_eq!(reporter.accepted(), 1);
    }

    #[test]
    fn test_finishes_on_complete() {
        let reporter = InteractiveReporter::hidden();
        reporter.handle(ScanProgress::ScanComplete {
            accepted: 2,
            processed: 3,
            rejected: 1,
            skipped: 0,
        });
        assert!(reporter.bar.is_finished());
        reporter.finish();
    }
}
