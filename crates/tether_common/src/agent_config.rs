//! Agent Configuration Store
//!
//! Persisted identity of the managing server: base URL and organization id.
//! Config file: ~/.config/tether/config.toml or /etc/tether/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted agent configuration
///
/// Written as a whole record; unset fields load as empty strings so a fresh
/// install starts from a blank identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base URL of the managing server
    #[serde(default)]
    pub host: String,

    /// Organization the agent belongs to
    #[serde(default)]
    pub organization_id: String,
}

/// Whole-record load/save access to the persisted agent configuration
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store bound to an explicit config file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get default user config path: ~/.config/tether/config.toml
    pub fn user_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("XDG_CONFIG_HOME"))
            .context("Cannot determine home directory")?;

        let config_dir = if home.contains("/.config") {
            PathBuf::from(home)
        } else {
            Path::new(&home).join(".config")
        };

        Ok(config_dir.join("tether").join("config.toml"))
    }

    /// Get system config path: /etc/tether/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/tether/config.toml")
    }

    /// Store bound to the default location
    ///
    /// Priority:
    /// 1. User config (~/.config/tether/config.toml), also used for new files
    /// 2. System config (/etc/tether/config.toml) when only that one exists
    pub fn default_location() -> Result<Self> {
        let user_path = Self::user_config_path()?;
        if !user_path.exists() && Self::system_config_path().exists() {
            return Ok(Self::new(Self::system_config_path()));
        }
        Ok(Self::new(user_path))
    }

    /// Path this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load configuration; a missing file yields defaults
    pub fn load(&self) -> Result<AgentConfig> {
        if !self.path.exists() {
            return Ok(AgentConfig::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let config: AgentConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(config)
    }

    /// Save the whole record, creating parent directories as needed
    pub fn save(&self, config: &AgentConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.path, toml_string)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_blank() {
        let config = AgentConfig::default();
        assert!(config.host.is_empty());
        assert!(config.organization_id.is_empty());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.toml"));

        let config = store.load().unwrap();
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("nested").join("config.toml"));

        let config = AgentConfig {
            host: "https://srv.example.com".to_string(),
            organization_id: "org-9".to_string(),
        };
        store.save(&config).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_toml_shape() {
        let config = AgentConfig {
            host: "https://srv.example.com".to_string(),
            organization_id: "org-9".to_string(),
        };
        let toml = toml::to_string(&config).unwrap();

        assert!(toml.contains("host"));
        assert!(toml.contains("organization_id"));
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "host = [not valid").unwrap();

        let store = ConfigStore::new(path);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "host = \"https://srv.example.com\"").unwrap();

        let store = ConfigStore::new(path);
        let config = store.load().unwrap();
        assert_eq!(config.host, "https://srv.example.com");
        assert!(config.organization_id.is_empty());
    }
}
