//! Renderer configuration
//!
//! Loaded from the `[typescript_api_box]` table of a TOML file:
//!
//! ```toml
//! [typescript_api_box]
//! data_file = "data/api.json"
//! repo = "owner/project"
//! max_depth = 32
//! expand_links = false
//! ```

use crate::diagnostics::{ApiBoxError, ApiBoxResult};
use crate::node::DeclarationNode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default limit on nested type derivations per symbol
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Table name in the config file
pub const CONFIG_SECTION: &str = "typescript_api_box";

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Configuration for one documentation build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiBoxConfig {
    /// Reflector JSON output
    pub data_file: PathBuf,

    /// Repository slug shown with source links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Limit on nested type derivations per symbol
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Expand `{@link Name}` tags in summaries and descriptions
    #[serde(default)]
    pub expand_links: bool,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    typescript_api_box: Option<ApiBoxConfig>,
}

impl ApiBoxConfig {
    /// Create a config for a data file with default settings
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            repo: None,
            max_depth: DEFAULT_MAX_DEPTH,
            expand_links: false,
        }
    }

    /// Set the repository slug
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Parse the `[typescript_api_box]` table from TOML text
    pub fn from_toml_str(text: &str) -> ApiBoxResult<Self> {
        let file: ConfigFile = toml::from_str(text)
            .map_err(|e| ApiBoxError::config(format!("invalid {} table: {}", CONFIG_SECTION, e)))?;
        let config = file.typescript_api_box.ok_or_else(|| {
            ApiBoxError::config(format!(
                "You need to provide the location of the api box data file in {}.data_file",
                CONFIG_SECTION
            ))
        })?;
        if config.max_depth == 0 {
            return Err(ApiBoxError::config("max_depth must be at least 1"));
        }
        Ok(config)
    }

    /// Load from a TOML file. A relative `data_file` resolves against the
    /// file's directory.
    pub fn load(path: impl AsRef<Path>) -> ApiBoxResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ApiBoxError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        tracing::debug!(config = %path.display(), "Loaded api box config");
        Ok(config.with_base_dir(base_dir))
    }

    /// Resolve a relative `data_file` against `base_dir`
    pub fn with_base_dir(mut self, base_dir: impl AsRef<Path>) -> Self {
        if self.data_file.is_relative() {
            self.data_file = base_dir.as_ref().join(&self.data_file);
        }
        self
    }

    /// Read and parse the declaration tree
    pub fn load_tree(&self) -> ApiBoxResult<DeclarationNode> {
        let tree = DeclarationNode::from_file(&self.data_file)?;
        tracing::debug!(data_file = %self.data_file.display(), "Loaded declaration tree");
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_parse_full_table() {
        let config = ApiBoxConfig::from_toml_str(
            r#"
            title = "site"

            [typescript_api_box]
            data_file = "data/api.json"
            repo = "acme/client"
            max_depth = 8
            expand_links = true
            "#,
        )
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("data/api.json"));
        assert_eq!(config.repo.as_deref(), Some("acme/client"));
        assert_eq!(config.max_depth, 8);
        assert!(config.expand_links);
    }

    #[test]
    fn test_defaults() {
        let config =
            ApiBoxConfig::from_toml_str("[typescript_api_box]\ndata_file = \"api.json\"\n").unwrap();
        assert_eq!(config, ApiBoxConfig::new("api.json"));
    }

    #[test]
    fn test_missing_section_is_fatal() {
        let err = ApiBoxConfig::from_toml_str("title = \"site\"").unwrap_err();
        assert!(matches!(err, ApiBoxError::Config(_)));
        assert!(err.to_string().contains("typescript_api_box.data_file"));
    }

    #[test]
    fn test_missing_data_file_is_fatal() {
        let err = ApiBoxConfig::from_toml_str("[typescript_api_box]\nrepo = \"a/b\"").unwrap_err();
        assert!(matches!(err, ApiBoxError::Config(_)));
        assert!(err.to_string().contains("data_file"));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = ApiBoxConfig::from_toml_str(
            "[typescript_api_box]\ndata_file = \"api.json\"\nmax_depth = 0",
        )
        .unwrap_err();
        assert!(matches!(err, ApiBoxError::Config(_)));
    }

    #[test]
    fn test_load_resolves_relative_data_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("apibox.toml"),
            "[typescript_api_box]\ndata_file = \"data/api.json\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("data/api.json"),
            r#"{"name": "lib", "children": [{"name": "Client", "kindString": "Class"}]}"#,
        )
        .unwrap();

        let config = ApiBoxConfig::load(dir.path().join("apibox.toml")).unwrap();
        assert_eq!(config.data_file, dir.path().join("data/api.json"));

        let tree = config.load_tree().unwrap();
        assert_eq!(tree.name, "lib");
        assert_eq!(tree.children[0].name, "Client");
    }

    #[test]
    fn test_absolute_data_file_kept() {
        let config = ApiBoxConfig::new("/srv/api.json").with_base_dir("/site");
        assert_eq!(config.data_file, PathBuf::from("/srv/api.json"));
    }

    #[test]
    fn test_malformed_tree() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("api.json");
        fs::write(&data, "{not json").unwrap();

        let err = ApiBoxConfig::new(&data).load_tree().unwrap_err();
        assert!(matches!(err, ApiBoxError::Serialization(_)));
    }
}
