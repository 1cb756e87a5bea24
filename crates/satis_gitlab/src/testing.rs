//! In-memory [`RepositoryClient`] for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::platform::{self, FindOptions, PlatformError, Project, RepositoryClient};

enum StubFile {
    Content(Vec<u8>),
    Unreachable,
}

#[derive(Default)]
struct StubCalls {
    find: Vec<FindOptions>,
    raw_files: Vec<(u64, String, String)>,
    exists: Vec<(String, String)>,
}

/// Serves canned pages and files, and records every call.
#[derive(Default)]
pub(crate) struct StubClient {
    pages: Vec<Vec<Project>>,
    repeating: Option<Vec<Project>>,
    failing_page: Option<u32>,
    files: HashMap<(u64, String), StubFile>,
    existing: HashSet<String>,
    failing: bool,
    calls: Mutex<StubCalls>,
}

impl StubClient {
    /// Append a listing page. Pages past the last one are empty.
    pub(crate) fn with_page(mut self, projects: Vec<Project>) -> Self {
        self.pages.push(projects);
        self
    }

    /// Return the same non-empty page forever.
    pub(crate) fn repeating(mut self, projects: Vec<Project>) -> Self {
        self.repeating = Some(projects);
        self
    }

    /// Fail the listing with a network error on `page`.
    pub(crate) fn failing_on_page(mut self, page: u32) -> Self {
        self.failing_page = Some(page);
        self
    }

    pub(crate) fn with_file(mut self, project_id: u64, path: &str, content: &str) -> Self {
        self.files.insert(
            (project_id, path.to_string()),
            StubFile::Content(content.as_bytes().to_vec()),
        );
        self
    }

    /// Fail downloads of `path` for this project with a network error.
    pub(crate) fn with_unreachable_file(mut self, project_id: u64, path: &str) -> Self {
        self.files
            .insert((project_id, path.to_string()), StubFile::Unreachable);
        self
    }

    /// Make `file_exists` report `path` as present for every project.
    pub(crate) fn with_existing_file(mut self, path: &str) -> Self {
        self.existing.insert(path.to_string());
        self
    }

    /// Fail every file operation with a network error.
    pub(crate) fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn calls(&self) -> std::sync::MutexGuard<'_, StubCalls> {
        self.calls.lock().expect("stub lock should not be poisoned")
    }

    pub(crate) fn find_calls(&self) -> Vec<FindOptions> {
        self.calls().find.clone()
    }

    pub(crate) fn raw_file_calls(&self) -> usize {
        self.calls().raw_files.len()
    }

    pub(crate) fn raw_file_requests(&self) -> Vec<(u64, String, String)> {
        self.calls().raw_files.clone()
    }

    pub(crate) fn exists_calls(&self) -> Vec<(String, String)> {
        self.calls().exists.clone()
    }
}

#[async_trait]
impl RepositoryClient for StubClient {
    fn host(&self) -> &str {
        "https://gitlab.test"
    }

    async fn find(&self, options: &FindOptions) -> platform::Result<Vec<Project>> {
        self.calls().find.push(options.clone());

        if self.failing_page == Some(options.page) {
            return Err(PlatformError::network("connection reset by peer"));
        }
        if let Some(projects) = &self.repeating {
            return Ok(projects.clone());
        }

        let index = options.page.saturating_sub(1) as usize;
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }

    async fn get_raw_file(
        &self,
        project: &Project,
        path: &str,
        reference: &str,
    ) -> platform::Result<Vec<u8>> {
        self.calls()
            .raw_files
            .push((project.id, path.to_string(), reference.to_string()));

        if self.failing {
            return Err(PlatformError::network("connection refused"));
        }
        match self.files.get(&(project.id, path.to_string())) {
            Some(StubFile::Content(body)) => Ok(body.clone()),
            Some(StubFile::Unreachable) => Err(PlatformError::network("operation timed out")),
            None => Err(PlatformError::file_not_found(path, reference)),
        }
    }

    async fn file_exists(
        &self,
        _project: &Project,
        path: &str,
        reference: &str,
    ) -> platform::Result<bool> {
        self.calls()
            .exists
            .push((path.to_string(), reference.to_string()));

        if self.failing {
            return Err(PlatformError::network("connection refused"));
        }
        Ok(self.existing.contains(path))
    }
}

/// A project with a default branch of `main` and a predictable clone URL.
pub(crate) fn project(id: u64, full_name: &str) -> Project {
    Project {
        id,
        name: full_name.rsplit('/').next().unwrap_or(full_name).to_string(),
        full_name: full_name.to_string(),
        http_url: format!("https://gitlab.test/{full_name}.git"),
        default_branch: Some("main".to_string()),
        ..Default::default()
    }
}
