//! Configuration management for VitaCare

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// API base URL used when neither the flag, the environment nor the config
/// file supplies one.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the clinic REST API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Rows per page for list views
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Quiet period before a search input triggers a fetch
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Hard ceiling on pages walked by a full collection scan
    #[serde(default = "default_scan_page_limit")]
    pub scan_page_limit: usize,
}

fn default_page_size() -> usize {
    10
}

fn default_debounce_ms() -> u64 {
    450
}

fn default_scan_page_limit() -> usize {
    50
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            scan_page_limit: default_scan_page_limit(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".vitacare").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path_override: Option<&str>) -> Result<PathBuf> {
        match path_override {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Directory holding the config file and the persisted session
    pub fn state_dir(path_override: Option<&str>) -> Result<PathBuf> {
        let path = Self::resolve_path(path_override)?;
        Ok(path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when no file exists yet
    pub fn load_at(path_override: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path_override)?;
        match Self::load_from(&path) {
            Ok(config) => Ok(config),
            Err(crate::error::Error::Config(ConfigError::NotFound)) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Save configuration to the resolved path
    pub fn save_at(&self, path_override: Option<&str>) -> Result<()> {
        self.save_to(&Self::resolve_path(path_override)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        write_private(path, &contents)
    }

    /// Resolve the API base URL.
    ///
    /// Precedence: CLI flag (which clap already merges with `VITACARE_API_URL`)
    /// > config file > built-in default.
    pub fn api_url(&self, flag: Option<&str>) -> String {
        let url = flag
            .map(str::to_string)
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        url.trim_end_matches('/').to_string()
    }
}

/// Write a file readable only by its owner, creating parent directories.
pub fn write_private(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, contents)?;

    // Set file permissions to 600 on Unix systems
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert_eq!(config.preferences.page_size, 10);
        assert_eq!(config.preferences.debounce_ms, 450);
        assert_eq!(config.preferences.scan_page_limit, 50);
    }

    #[test]
    fn test_api_url_precedence() {
        let mut config = Config::default();
        assert_eq!(config.api_url(None), DEFAULT_API_URL);

        config.api_url = Some("https://clinic.example/api/".to_string());
        assert_eq!(config.api_url(None), "https://clinic.example/api");
        assert_eq!(
            config.api_url(Some("http://127.0.0.1:9000")),
            "http://127.0.0.1:9000"
        );
    }

    #[test]
    fn test_load_at_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let config = Config::load_at(path.to_str()).unwrap();
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.api_url = Some("http://api.local".to_string());
        config.preferences.page_size = 25;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_url.as_deref(), Some("http://api.local"));
        assert_eq!(loaded.preferences.page_size, 25);
        assert_eq!(loaded.preferences.debounce_ms, 450);
    }

    #[test]
    fn test_partial_preferences_fill_defaults() {
        let config: Config =
            serde_yaml::from_str("api_url: http://x\npreferences:\n  page_size: 5\n").unwrap();
        assert_eq!(config.preferences.page_size, 5);
        assert_eq!(config.preferences.scan_page_limit, 50);
    }

    #[test]
    fn test_state_dir_is_config_parent() {
        let dir = Config::state_dir(Some("/tmp/vc/config.yaml")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/vc"));
    }
}
