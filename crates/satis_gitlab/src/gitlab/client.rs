//! GitLab API client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use url::Url;

use super::convert::to_project;
use super::error::GitLabError;
use super::types::GitLabProject;
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::platform::{self, ClientOptions, FindOptions, Project, RepositoryClient};

/// Number of projects requested per listing page.
pub const PAGE_SIZE: u32 = 50;

/// Default request timeout.
const REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// GitLab REST (v4) client.
///
/// Every call issues exactly one request; there is no retry or pagination
/// logic here, the scan drives pages itself.
#[derive(Clone)]
pub struct GitLabClient {
    transport: Arc<dyn HttpTransport>,
    host: String,
    api_base: Url,
    token: Option<String>,
}

impl GitLabClient {
    /// Create a new GitLab client backed by reqwest.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let options = ClientOptions::new("https://gitlab.example.com")
    ///     .with_token(Some("glpat-...".to_string()));
    /// let client = GitLabClient::new(&options)?;
    /// ```
    pub fn new(options: &ClientOptions) -> Result<Self, GitLabError> {
        let transport = ReqwestTransport::with_options(REQUEST_TIMEOUT, options.unsafe_ssl)
            .map_err(|e| GitLabError::Config(e.to_string()))?;
        Self::new_with_transport(options, Arc::new(transport))
    }

    pub fn new_with_transport(
        options: &ClientOptions,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, GitLabError> {
        let host = normalize_host(&options.url);
        let api_base = Url::parse(&format!("{}/api/v4", host))
            .map_err(|e| GitLabError::Config(format!("invalid GitLab URL '{}': {}", host, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(GitLabError::Config(format!(
                "invalid GitLab URL '{}'",
                options.url
            )));
        }

        Ok(Self {
            transport,
            host,
            api_base,
            token: options.token.clone(),
        })
    }

    /// Get the host URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build an API URL from path segments. Each segment is percent-encoded,
    /// so a file path like `dir/composer.json` becomes a single segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), "satis-gitlab".to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("PRIVATE-TOKEN".to_string(), token.clone()));
        }
        headers
    }

    async fn send(&self, method: HttpMethod, url: Url) -> Result<HttpResponse, GitLabError> {
        tracing::debug!("{} {}", method.as_str(), url);
        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers: self.headers(),
        };

        self.transport
            .send(request)
            .await
            .map_err(|e| GitLabError::Http(e.to_string()))
    }

    /// List one page of projects visible to the current token.
    pub async fn list_projects(
        &self,
        search: Option<&str>,
        page: u32,
    ) -> Result<Vec<GitLabProject>, GitLabError> {
        let mut url = self.endpoint(&["projects"]);
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page", &page.to_string())
                .append_pair("per_page", &PAGE_SIZE.to_string());
            if let Some(search) = search {
                query.append_pair("search", search);
            }
        }

        let response = self.send(HttpMethod::Get, url).await?;
        if !response.is_success() {
            return Err(GitLabError::from_status(response.status, &response.body));
        }

        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Download a file from a project's repository.
    pub async fn get_raw_file(
        &self,
        project_id: u64,
        path: &str,
        reference: &str,
    ) -> Result<Vec<u8>, GitLabError> {
        let id = project_id.to_string();
        let mut url = self.endpoint(&["projects", &id, "repository", "files", path, "raw"]);
        url.query_pairs_mut().append_pair("ref", reference);

        let response = self.send(HttpMethod::Get, url).await?;
        match response.status {
            200..=299 => Ok(response.body),
            404 => Err(GitLabError::FileNotFound {
                path: path.to_string(),
                reference: reference.to_string(),
            }),
            status => Err(GitLabError::from_status(status, &response.body)),
        }
    }

    /// Check for a file with a HEAD request on the file metadata endpoint.
    pub async fn file_exists(
        &self,
        project_id: u64,
        path: &str,
        reference: &str,
    ) -> Result<bool, GitLabError> {
        let id = project_id.to_string();
        let mut url = self.endpoint(&["projects", &id, "repository", "files", path]);
        url.query_pairs_mut().append_pair("ref", reference);

        let response = self.send(HttpMethod::Head, url).await?;
        match response.status {
            200..=299 => Ok(true),
            404 => Ok(false),
            status => Err(GitLabError::from_status(status, &response.body)),
        }
    }
}

/// Strip trailing slashes and an explicit `/api/v4` suffix; default to https.
fn normalize_host(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let trimmed = trimmed
        .strip_suffix("/api/v4")
        .unwrap_or(trimmed)
        .trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

#[async_trait]
impl RepositoryClient for GitLabClient {
    fn host(&self) -> &str {
        GitLabClient::host(self)
    }

    async fn find(&self, options: &FindOptions) -> platform::Result<Vec<Project>> {
        let projects = self
            .list_projects(options.search.as_deref(), options.page)
            .await?;
        Ok(projects.iter().map(to_project).collect())
    }

    async fn get_raw_file(
        &self,
        project: &Project,
        path: &str,
        reference: &str,
    ) -> platform::Result<Vec<u8>> {
        Ok(GitLabClient::get_raw_file(self, project.id, path, reference).await?)
    }

    async fn file_exists(
        &self,
        project: &Project,
        path: &str,
        reference: &str,
    ) -> platform::Result<bool> {
        Ok(GitLabClient::file_exists(self, project.id, path, reference).await?)
    }
}
