use async_trait::async_trait;

use super::errors::Result;

/// Connection settings for a hosting platform.
///
/// Built once at startup and shared by reference with the client and with
/// the output configuration (token and TLS settings are written there too).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Base URL of the instance (e.g. "https://gitlab.example.com").
    pub url: String,
    /// Personal access token.
    pub token: Option<String>,
    /// Disable TLS certificate verification.
    pub unsafe_ssl: bool,
}

impl ClientOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            unsafe_ssl: false,
        }
    }

    /// Set the access token. Blank tokens are ignored.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_unsafe_ssl(mut self, unsafe_ssl: bool) -> Self {
        self.unsafe_ssl = unsafe_ssl;
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Host name of the instance, without scheme or port. A URL without a
    /// scheme is read as https.
    pub fn host(&self) -> Option<String> {
        let url = self.url.trim();
        let parsed = if url.contains("://") {
            url::Url::parse(url)
        } else {
            url::Url::parse(&format!("https://{}", url))
        };
        parsed.ok().and_then(|u| u.host_str().map(str::to_string))
    }
}

/// Query for one page of the project listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    /// Search query passed through to the hosting API.
    pub search: Option<String>,
    /// Page index, starting at 1.
    pub page: u32,
}

impl FindOptions {
    pub fn page(search: Option<&str>, page: u32) -> Self {
        Self {
            search: search.map(str::to_string),
            page,
        }
    }
}

/// Namespace (group or user) owning a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    pub id: u64,
    pub name: String,
    pub full_path: String,
}

/// A hosted project (platform-agnostic snapshot from the listing API).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    /// Platform-specific numeric ID.
    pub id: u64,
    /// Human-readable name.
    pub name: String,
    /// Namespace-qualified path (e.g. "group/subgroup/project").
    pub full_name: String,
    /// Owning namespace.
    pub namespace: Namespace,
    /// HTTP clone URL.
    pub http_url: String,
    /// Default branch; absent for empty repositories.
    pub default_branch: Option<String>,
    /// Declared project type, when the platform exposes one.
    pub project_type: Option<String>,
}

impl Project {
    /// "name (branch main) : message", used for per-project log lines.
    pub fn message(&self, message: &str) -> String {
        format!(
            "{} (branch {}) : {}",
            self.full_name,
            self.default_branch.as_deref().unwrap_or("none"),
            message
        )
    }
}

/// Operations the scan needs from a hosting platform.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Display URL of the instance.
    fn host(&self) -> &str;

    /// Fetch one page of projects. An empty page means the listing is exhausted.
    async fn find(&self, options: &FindOptions) -> Result<Vec<Project>>;

    /// Fetch the raw content of `path` at `reference`.
    ///
    /// Fails with [`PlatformError::FileNotFound`](super::PlatformError::FileNotFound)
    /// when the file does not exist at that ref.
    async fn get_raw_file(&self, project: &Project, path: &str, reference: &str)
    -> Result<Vec<u8>>;

    /// Check whether `path` exists at `reference` without downloading it.
    async fn file_exists(&self, project: &Project, path: &str, reference: &str) -> Result<bool>;
}
