use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::error::SatisConfigError;
use crate::scan::RepositorySink;

/// Template used when no `--template` is given.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/default-template.json");

/// Builds a SATIS `satis.json` on top of a template.
///
/// Keys keep the template's order; new keys are appended.
#[derive(Debug, Clone)]
pub struct SatisConfigBuilder {
    config: Map<String, Value>,
}

impl SatisConfigBuilder {
    /// Start from the embedded default template.
    pub fn new() -> Result<Self, SatisConfigError> {
        Self::from_template_str(DEFAULT_TEMPLATE)
    }

    pub fn from_template_str(template: &str) -> Result<Self, SatisConfigError> {
        match serde_json::from_str(template)? {
            Value::Object(config) => Ok(Self { config }),
            _ => Err(SatisConfigError::InvalidTemplate),
        }
    }

    pub fn from_template_path(path: &Path) -> Result<Self, SatisConfigError> {
        let template = fs::read_to_string(path).map_err(|source| SatisConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_template_str(&template)
    }

    pub fn set_homepage(&mut self, homepage: &str) {
        self.config
            .insert("homepage".to_string(), Value::String(homepage.to_string()));
    }

    /// Mirror package archives into `dist/`.
    pub fn enable_archive(&mut self) {
        self.config.insert(
            "archive".to_string(),
            json!({
                "directory": "dist",
                "format": "tar",
                "skip-dev": true
            }),
        );
    }

    /// Register a GitLab domain so composer uses GitLab authentication for it.
    pub fn add_gitlab_domain(&mut self, domain: &str) {
        let domains = array_entry(object_entry(&mut self.config, "config"), "gitlab-domains");
        if !domains.iter().any(|d| d.as_str() == Some(domain)) {
            domains.push(Value::String(domain.to_string()));
        }
    }

    /// Write the access token for `domain`.
    ///
    /// With `unsafe_ssl`, TLS and secure-http are disabled for composer too.
    pub fn add_gitlab_token(&mut self, domain: &str, token: &str, unsafe_ssl: bool) {
        let config = object_entry(&mut self.config, "config");
        object_entry(config, "gitlab-token")
            .insert(domain.to_string(), Value::String(token.to_string()));
        if unsafe_ssl {
            config.insert("disable-tls".to_string(), Value::Bool(true));
            config.insert("secure-http".to_string(), Value::Bool(false));
        }
    }

    /// Register a VCS repository and require every version of its package.
    pub fn add_repository(&mut self, name: &str, url: &str, unsafe_ssl: bool) {
        let mut repository = json!({
            "type": "vcs",
            "url": url
        });
        if unsafe_ssl {
            repository["options"] = json!({
                "ssl": {
                    "verify_peer": false,
                    "verify_peer_name": false,
                    "allow_self_signed": true
                }
            });
        }
        array_entry(&mut self.config, "repositories").push(repository);
        object_entry(&mut self.config, "require")
            .insert(name.to_string(), Value::String("*".to_string()));
    }

    /// Number of entries in `repositories`.
    pub fn repository_count(&self) -> usize {
        self.config
            .get("repositories")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.config)
    }

    /// Pretty-printed JSON with four-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, SatisConfigError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.config.serialize(&mut serializer)?;
        out.push(b'\n');
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub fn write_to(&self, path: &Path) -> Result<(), SatisConfigError> {
        let content = self.to_json_pretty()?;
        fs::write(path, content).map_err(|source| SatisConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl RepositorySink for SatisConfigBuilder {
    fn add_repository(&mut self, name: &str, url: &str, unsafe_ssl: bool) {
        SatisConfigBuilder::add_repository(self, name, url, unsafe_ssl);
    }
}

/// Get `map[key]` as an object, replacing any non-object value.
fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    match entry {
        Value::Object(inner) => inner,
        _ => unreachable!("entry was just set to an object"),
    }
}

/// Get `map[key]` as an array, replacing any non-array value.
fn array_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Vec<Value> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !entry.is_array() {
        *entry = Value::Array(Vec::new());
    }
    match entry {
        Value::Array(inner) => inner,
        _ => unreachable!("entry was just set to an array"),
    }
}
