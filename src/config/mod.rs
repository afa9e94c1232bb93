//! Configuration management for rmine.
//!
//! This module handles loading and saving the on-disk configuration:
//! the server URL, the login name, and user-defined aliases. The API
//! key itself lives in the OS keyring, never in this file.

mod aliases;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable that overrides the config directory.
///
/// Used by tests to point at a temporary directory.
const CONFIG_DIR_ENV: &str = "RMINE_CONFIG_DIR";

/// The config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Default page size for list commands.
const DEFAULT_LIMIT: u32 = 25;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The config directory could not be created.
    #[error("could not create configuration directory: {0}")]
    CreateDirError(std::io::Error),

    /// The config file could not be read.
    #[error("could not read configuration file: {0}")]
    ReadError(std::io::Error),

    /// The config file could not be written.
    #[error("could not write configuration file: {0}")]
    WriteError(std::io::Error),

    /// The config file is not valid TOML.
    #[error("could not parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The config could not be serialized.
    #[error("could not serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A value failed validation.
    #[error("{0}")]
    ValidationError(String),

    /// No login has been configured yet.
    #[error("not logged in: run 'rmine login' first")]
    NotLoggedIn,

    /// An alias lookup failed.
    #[error("unknown alias or id: '{0}'")]
    UnknownAlias(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The rmine configuration.
///
/// Persisted as TOML in the platform config directory
/// (e.g. `~/.config/rmine/config.toml` on Linux).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// The Redmine server URL.
    #[serde(default)]
    pub url: String,

    /// The login name of the authenticated account.
    ///
    /// Also the keyring username under which the API key is stored.
    #[serde(default)]
    pub login: String,

    /// Default page size for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// User-defined aliases mapping short names to numeric IDs.
    #[serde(default)]
    pub aliases: BTreeMap<String, i64>,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            login: String::new(),
            default_limit: DEFAULT_LIMIT,
            aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load the configuration from disk.
    ///
    /// A missing file is not an error; it yields the default config so
    /// that `rmine login` can run on a fresh machine.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save the configuration to disk, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(ConfigError::CreateDirError)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(ConfigError::WriteError)?;
        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Get the config file path.
    ///
    /// Honors the `RMINE_CONFIG_DIR` environment variable; otherwise
    /// uses the platform config directory.
    pub fn path() -> Result<PathBuf> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join("rmine"),
        };
        Ok(dir.join(CONFIG_FILE))
    }

    /// Check whether a login has been configured.
    pub fn is_logged_in(&self) -> bool {
        !self.url.is_empty() && !self.login.is_empty()
    }

    /// Ensure a login has been configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotLoggedIn` if `rmine login` has not run.
    pub fn require_login(&self) -> Result<()> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(ConfigError::NotLoggedIn)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_temp_config_dir<F: FnOnce()>(f: F) {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(CONFIG_DIR_ENV, dir.path());
        f();
        std::env::remove_var(CONFIG_DIR_ENV);
    }

    #[test]
    #[serial]
    fn test_load_missing_file_yields_default() {
        with_temp_config_dir(|| {
            let config = Config::load().unwrap();
            assert_eq!(config, Config::default());
            assert!(!config.is_logged_in());
        });
    }

    #[test]
    #[serial]
    fn test_save_and_load_roundtrip() {
        with_temp_config_dir(|| {
            let mut config = Config::default();
            config.url = "https://redmine.example.com".to_string();
            config.login = "jsmith".to_string();
            config.aliases.insert("infra".to_string(), 12);

            config.save().unwrap();
            let loaded = Config::load().unwrap();
            assert_eq!(loaded, config);
        });
    }

    #[test]
    #[serial]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deeper").join("still");
        std::env::set_var(CONFIG_DIR_ENV, &nested);

        let config = Config::default();
        config.save().unwrap();
        assert!(nested.join(CONFIG_FILE).exists());

        std::env::remove_var(CONFIG_DIR_ENV);
    }

    #[test]
    #[serial]
    fn test_load_rejects_invalid_toml() {
        with_temp_config_dir(|| {
            let path = Config::path().unwrap();
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "url = [not toml").unwrap();

            let result = Config::load();
            assert!(matches!(result, Err(ConfigError::ParseError(_))));
        });
    }

    #[test]
    fn test_require_login() {
        let mut config = Config::default();
        assert!(matches!(
            config.require_login(),
            Err(ConfigError::NotLoggedIn)
        ));

        config.url = "https://redmine.example.com".to_string();
        config.login = "jsmith".to_string();
        assert!(config.require_login().is_ok());
    }

    #[test]
    fn test_default_limit() {
        let config = Config::default();
        assert_eq!(config.default_limit, 25);
    }

    #[test]
    fn test_partial_config_parses() {
        // Old config files may predate default_limit
        let config: Config = toml::from_str("url = \"https://x\"\nlogin = \"a\"").unwrap();
        assert_eq!(config.default_limit, 25);
        assert!(config.aliases.is_empty());
    }
}
