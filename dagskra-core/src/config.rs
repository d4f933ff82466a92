//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Main configuration struct matching the dagskra.yml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub programs: ProgramsConfig,

    #[serde(default)]
    pub server: ServerConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

fn default_title() -> String {
    String::from("Dagskrárbankinn")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding devlog markdown files
    #[serde(default = "default_devlogs_dir")]
    pub devlogs: PathBuf,

    /// Optional JSON snapshot of the program bank
    #[serde(default)]
    pub programs: Option<PathBuf>,
}

fn default_devlogs_dir() -> PathBuf {
    PathBuf::from("content/devlogs")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramsConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    12
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound for the `limit` query parameter of the devlog API
    #[serde(default = "default_max_devlog_limit")]
    pub max_devlog_limit: usize,
}

fn default_port() -> u16 {
    8000
}

fn default_max_devlog_limit() -> usize {
    50
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    /// resolved against the current directory.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(contents)?
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.programs.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "programs.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.server.max_devlog_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_devlog_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Get the devlog directory, resolved relative to config file
    pub fn devlogs_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.devlogs)
    }

    /// Get the program snapshot path, resolved relative to config file
    pub fn programs_path(&self) -> Option<PathBuf> {
        self.paths.programs.as_ref().map(|p| self.resolve_path(p))
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: None,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            devlogs: default_devlogs_dir(),
            programs: None,
        }
    }
}

impl Default for ProgramsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            max_devlog_limit: default_max_devlog_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_devlog_limit, 50);
        assert_eq!(config.programs.page_size, 12);
        assert_eq!(config.devlogs_dir(), PathBuf::from("content/devlogs"));
        assert!(config.programs_path().is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml_str("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.max_devlog_limit, 50);
        assert_eq!(config.site.title, "Dagskrárbankinn");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml_str("").unwrap();
        assert_eq!(config.programs.page_size, 12);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = Config::from_yaml_str("programs:\n  page_size: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_paths_resolve_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("dagskra.yml");
        std::fs::write(
            &config_path,
            "paths:\n  devlogs: posts\n  programs: data/programs.json\n",
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.devlogs_dir(), dir.path().join("posts"));
        assert_eq!(
            config.programs_path(),
            Some(dir.path().join("data/programs.json"))
        );
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.yml")).unwrap();
        assert_eq!(config.server.port, 8000);
    }
}
