//! Configuration file support for satis-gitlab.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI arguments and flags
//! 2. Environment variables (prefixed with `SATIS_GITLAB__`, sections separated
//!    by `__`, e.g. `SATIS_GITLAB__GITLAB__TOKEN`)
//! 3. Local config file (./satis-gitlab.toml)
//! 4. XDG config file (~/.config/satis-gitlab/config.toml)
//! 5. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [gitlab]
//! url = "https://gitlab.example.com"
//! token = "glpat-..."  # or use SATIS_GITLAB__GITLAB__TOKEN
//! unsafe_ssl = false
//!
//! [scan]
//! project_filter = "php"
//! max_pages = 10000
//!
//! [output]
//! path = "satis.json"
//! template = "satis-template.json"
//! homepage = "https://packages.example.com"
//! archive = true
//! no_token = false
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use satis_gitlab::MAX_PAGES;
use serde::Deserialize;

const APP_NAME: &str = "satis-gitlab";
const LOCAL_CONFIG: &str = "satis-gitlab.toml";
const ENV_PREFIX: &str = "SATIS_GITLAB";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gitlab: GitLabConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// GitLab connection.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitLabConfig {
    /// Instance URL (e.g. "https://gitlab.example.com").
    pub url: String,
    /// Personal access token.
    pub token: Option<String>,
    /// Disable TLS certificate verification.
    pub unsafe_ssl: bool,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            url: "https://gitlab.com".to_string(),
            token: None,
            unsafe_ssl: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Search query passed to the project listing.
    pub project_filter: Option<String>,
    /// Page cap.
    pub max_pages: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            project_filter: None,
            max_pages: MAX_PAGES,
        }
    }
}

/// Generated file settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// Base `satis.json`; the embedded template is used when unset.
    pub template: Option<PathBuf>,
    pub homepage: Option<String>,
    pub archive: bool,
    /// Do not write the access token into the generated file.
    pub no_token: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("satis.json"),
            template: None,
            homepage: None,
            archive: false,
            no_token: false,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/satis-gitlab/config.toml)
    /// 3. Local config file (./satis-gitlab.toml)
    /// 4. Environment variables with the SATIS_GITLAB__ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            tracing::debug!("Loading config from ./{}", LOCAL_CONFIG);
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // SATIS_GITLAB__OUTPUT__NO_TOKEN -> output.no_token
        builder = builder.add_source(environment());

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
