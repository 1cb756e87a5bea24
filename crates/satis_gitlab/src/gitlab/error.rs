//! GitLab API error types.

use thiserror::Error;

use crate::platform::PlatformError;

/// Errors that can occur when interacting with the GitLab API.
#[derive(Debug, Error)]
pub enum GitLabError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("HTTP request error: {0}")]
    Http(String),

    /// API returned an unexpected status.
    #[error("GitLab API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File not found: {path} (ref {reference})")]
    FileNotFound { path: String, reference: String },

    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid client configuration (bad base URL, TLS setup).
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GitLabError {
    /// Classify an HTTP status code and response body into a typed error.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body).trim().to_string();
        match status {
            401 | 403 => Self::Auth(format!("{}: {}", status, body)),
            404 => Self::NotFound(body),
            _ => Self::Api {
                status,
                message: body,
            },
        }
    }
}

/// Convert GitLabError to platform-agnostic PlatformError.
impl From<GitLabError> for PlatformError {
    fn from(err: GitLabError) -> Self {
        match err {
            GitLabError::Http(msg) => PlatformError::network(msg),
            GitLabError::Api { status, message } => {
                PlatformError::api(format!("{}: {}", status, message))
            }
            GitLabError::Auth(_) => PlatformError::AuthRequired,
            GitLabError::NotFound(resource) => PlatformError::not_found(resource),
            GitLabError::FileNotFound { path, reference } => {
                PlatformError::file_not_found(path, reference)
            }
            GitLabError::Json(e) => PlatformError::internal(format!("JSON parse error: {}", e)),
            GitLabError::Config(msg) => PlatformError::internal(msg),
        }
    }
}
