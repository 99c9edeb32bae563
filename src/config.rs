//! Service configuration
//!
//! Region, project scoping and endpoint settings consumed by the fetcher.
//! All identifiers are opaque strings supplied by the caller; the fetcher
//! never interprets them. Configs load from YAML files or inline JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Default page size used when an endpoint does not override it
pub const DEFAULT_PAGE_SIZE: u32 = 100;

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Configuration for one regional API service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the regional API endpoint
    pub endpoint: String,

    /// Region name (opaque, e.g. "cn-north-4")
    pub region: String,

    /// Project identifier substituted into `{project_id}` path templates
    pub project_id: String,

    /// Auth token sent as the `X-Auth-Token` header; obtaining and
    /// refreshing it is the caller's concern
    #[serde(default)]
    pub token: Option<String>,

    /// Page size applied to paginated requests unless overridden
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Extra headers attached to every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ServiceConfig {
    /// Create a config with the required scoping identifiers
    pub fn new(
        endpoint: impl Into<String>,
        region: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            region: region.into(),
            project_id: project_id.into(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            headers: HashMap::new(),
        }
    }

    /// Set the auth token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the default page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Load from a YAML string
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Load from a JSON value
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::missing_field("endpoint"));
        }
        if self.project_id.is_empty() {
            return Err(Error::missing_field("project_id"));
        }
        if self.page_size == 0 {
            return Err(Error::config("page_size must be >= 1"));
        }
        Ok(())
    }

    /// Path-template variables derived from this config
    pub fn path_vars(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("project_id".to_string(), self.project_id.clone());
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_builder() {
        let config = ServiceConfig::new("https://rds.example.com", "cn-north-4", "p123")
            .with_token("tok-abc")
            .with_page_size(50);

        assert_eq!(config.endpoint, "https://rds.example.com");
        assert_eq!(config.region, "cn-north-4");
        assert_eq!(config.project_id, "p123");
        assert_eq!(config.token, Some("tok-abc".to_string()));
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r"
endpoint: https://rds.cn-north-4.example.com
region: cn-north-4
project_id: 0ab1cd2ef3
token: tok-123
";
        let config = ServiceConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.project_id, "0ab1cd2ef3");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_config_from_yaml_file() {
        let yaml = "endpoint: https://rds.example.com\nregion: r1\nproject_id: p1\n";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.yaml");
        std::fs::write(&path, yaml).unwrap();

        let config = ServiceConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.region, "r1");
    }

    #[test]
    fn test_config_rejects_missing_fields() {
        let err = ServiceConfig::from_yaml_str("endpoint: ''\nregion: r\nproject_id: p\n")
            .unwrap_err();
        assert!(err.to_string().contains("endpoint"));

        let err = ServiceConfig::from_yaml_str("endpoint: e\nregion: r\nproject_id: ''\n")
            .unwrap_err();
        assert!(err.to_string().contains("project_id"));
    }

    #[test]
    fn test_config_rejects_zero_page_size() {
        let yaml = "endpoint: e\nregion: r\nproject_id: p\npage_size: 0\n";
        assert!(ServiceConfig::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_path_vars() {
        let config = ServiceConfig::new("e", "r", "proj-9");
        let vars = config.path_vars();
        assert_eq!(vars.get("project_id"), Some(&"proj-9".to_string()));
    }
}
