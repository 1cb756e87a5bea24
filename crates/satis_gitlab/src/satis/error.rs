//! SATIS configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SatisConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in template: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template must be a JSON object")]
    InvalidTemplate,
}
