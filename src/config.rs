use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub pages: PagesConfig,
    pub log: LogConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL all endpoint paths are appended to
    pub base_url: String,
    /// Per-request timeout in seconds (unset = transport default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Local store settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store file (empty = default data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Navigation targets used by the auth section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    pub login: String,
    pub register: String,
    pub profile: String,
    pub settings: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            login: "login.html".to_string(),
            register: "register.html".to_string(),
            profile: "profile.html".to_string(),
            settings: "settings.html".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// tracing-subscriber EnvFilter directive; RUST_LOG wins when set
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("cadence");

        fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config and save it
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Resolved store path
    pub fn store_path(&self) -> Result<PathBuf> {
        match self.storage.path {
            Some(ref p) if !p.is_empty() => Ok(PathBuf::from(p)),
            _ => crate::storage::RedbStore::default_path(),
        }
    }

    /// Generate example config content for documentation
    pub fn example_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.backend.base_url, "http://localhost");
        assert_eq!(config.backend.request_timeout_secs, None);
        assert_eq!(config.storage.path, None);
        assert_eq!(config.pages.login, "login.html");
        assert_eq!(config.pages.register, "register.html");
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial_toml = r#"
[backend]
base_url = "http://192.168.1.100:8080"
"#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        // Custom value
        assert_eq!(config.backend.base_url, "http://192.168.1.100:8080");
        // Default values
        assert_eq!(config.backend.request_timeout_secs, None);
        assert_eq!(config.pages.login, "login.html");
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_full_config_parsing() {
        let full_toml = r#"
[backend]
base_url = "https://music.example"
request_timeout_secs = 15

[storage]
path = "/custom/store.redb"

[pages]
login = "/auth/login"
register = "/auth/register"
profile = "/me"
settings = "/me/settings"

[log]
filter = "cadence=debug"
"#;

        let config: Config = toml::from_str(full_toml).unwrap();

        assert_eq!(config.backend.base_url, "https://music.example");
        assert_eq!(config.backend.request_timeout_secs, Some(15));
        assert_eq!(config.store_path().unwrap(), PathBuf::from("/custom/store.redb"));
        assert_eq!(config.pages.login, "/auth/login");
        assert_eq!(config.pages.register, "/auth/register");
        assert_eq!(config.pages.profile, "/me");
        assert_eq!(config.pages.settings, "/me/settings");
        assert_eq!(config.log.filter, "cadence=debug");
    }

    #[test]
    fn test_example_config_is_valid() {
        let example = Config::example_config();
        let parsed: Result<Config, _> = toml::from_str(&example);
        assert!(parsed.is_ok(), "Example config should be valid TOML");
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid [[ toml";
        let result: Result<Config, _> = toml::from_str(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[log]\nfilter = \"warn\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.log.filter, "warn");
        assert_eq!(config.backend.base_url, "http://localhost");
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("nope.toml")).is_err());
    }
}
