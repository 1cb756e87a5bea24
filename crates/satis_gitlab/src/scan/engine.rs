//! The paginated scan loop.

use super::progress::{ProgressCallback, ScanProgress, emit};
use super::types::{RepositorySink, ScanError, ScanOptions, ScanResult};
use crate::filter::FilterChain;
use crate::manifest::ManifestExtractor;
use crate::platform::{FindOptions, RepositoryClient};

/// Scan every listing page, filter each project and write accepted packages
/// to `sink`.
///
/// Pages are requested from 1 until an empty page comes back or
/// `options.max_pages` pages (at least one) have been fetched. A failed
/// listing request stops the scan; projects already written to the sink
/// stay there.
/// Per-project problems (filter rejection, missing or unusable manifest)
/// are reported through `on_progress` and counted, never returned.
pub async fn scan_projects(
    client: &dyn RepositoryClient,
    filters: &FilterChain,
    sink: &mut dyn RepositorySink,
    options: &ScanOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<ScanResult, ScanError> {
    let extractor = ManifestExtractor::new(client);
    let mut result = ScanResult::default();
    let max_pages = options.max_pages.max(1);

    emit(
        on_progress,
        ScanProgress::ScanStarted {
            host: client.host().to_string(),
            search: options.search.clone(),
            max_pages,
        },
    );

    let mut page = 1;
    while page <= max_pages {
        emit(on_progress, ScanProgress::FetchingPage { page });

        let projects = client
            .find(&FindOptions::page(options.search.as_deref(), page))
            .await
            .map_err(|source| ScanError::Listing { page, source })?;

        if projects.is_empty() {
            tracing::debug!(page, "Listing exhausted");
            break;
        }

        result.pages += 1;
        result.processed += projects.len();
        emit(
            on_progress,
            ScanProgress::FetchedPage {
                page,
                count: projects.len(),
                processed_so_far: result.processed,
            },
        );

        for project in projects {
            let decision = filters.evaluate(&project).await;
            if !decision.accepted {
                result.rejected += 1;
                emit(
                    on_progress,
                    ScanProgress::ProjectRejected {
                        project,
                        reason: decision.reason.unwrap_or_default(),
                    },
                );
                continue;
            }

            match extractor.extract(&project).await {
                Ok(package) => {
                    sink.add_repository(&package, &project.http_url, options.unsafe_ssl);
                    result.accepted += 1;
                    emit(
                        on_progress,
                        ScanProgress::ProjectAccepted {
                            project,
                            package,
                            accepted_so_far: result.accepted,
                        },
                    );
                }
                Err(error) => {
                    result.skipped += 1;
                    emit(on_progress, ScanProgress::ProjectSkipped { project, error });
                }
            }
        }

        page += 1;
    }

    if page > max_pages {
        result.page_limit_reached = true;
        tracing::debug!(max_pages, "Page limit reached");
        emit(on_progress, ScanProgress::PageLimitReached { max_pages });
    }

    if result.no_project_found() {
        emit(
            on_progress,
            ScanProgress::NoProjectFound {
                processed: result.processed,
            },
        );
    } else {
        emit(
            on_progress,
            ScanProgress::ScanComplete {
                accepted: result.accepted,
                processed: result.processed,
                rejected: result.rejected,
                skipped: result.skipped,
            },
        );
    }

    Ok(result)
}
