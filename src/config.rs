//! Configuration for the repository CLI
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (schema-repo.toml)
//! - Environment variables (SCHEMA_REPO_*)
//!
//! ## Example config file (schema-repo.toml):
//! ```toml
//! [repository]
//! root = "./schemas"
//! namespace = "schemas.example.com"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the repository CLI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RepoConfig {
    /// Repository settings
    #[serde(default)]
    pub repository: RepositorySection,
}

/// Repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySection {
    /// Working root the `repository/` directory lives under
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Namespace used when initializing a new repository
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

// Default value functions
fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_namespace() -> String {
    "schemas.example.com".to_string()
}

impl Default for RepositorySection {
    fn default() -> Self {
        Self {
            root: default_root(),
            namespace: default_namespace(),
        }
    }
}

impl RepoConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["schema-repo.toml", ".schema-repo.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "schemarepo", "schema-repo")
        {
            let xdg_config = config_dir.config_dir().join("schema-repo.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (SCHEMA_REPO_*)
        builder = builder.add_source(
            Environment::with_prefix("SCHEMA_REPO")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the working root (resolves relative paths)
    pub fn repository_root(&self) -> PathBuf {
        if self.repository.root.is_absolute() {
            self.repository.root.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.repository.root)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = RepoConfig::default();
        assert_eq!(config.repository.root, PathBuf::from("."));
        assert_eq!(config.repository.namespace, "schemas.example.com");
    }

    #[test]
    fn test_serialize_config() {
        let config = RepoConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[repository]"));
        assert!(toml_str.contains("namespace"));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema-repo.toml");

        let mut config = RepoConfig::default();
        config.repository.namespace = "acme.schemas".to_string();
        config.save(path.to_str().unwrap()).unwrap();

        let loaded = RepoConfig::load_from(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.repository.namespace, "acme.schemas");
        assert_eq!(loaded.repository.root, PathBuf::from("."));
    }
}
