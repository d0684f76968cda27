//! Persisted settings: database location and metadata lookup service.
//!
//! The settings file is `~/.config/libris/settings.toml`. Every value can be
//! overridden by an environment variable, and the database path also by a
//! command-line flag:
//!
//! 1. CLI flag
//! 2. Environment variable (`LIBRIS_DB`, `LIBRIS_LOOKUP_URL`)
//! 3. `settings.toml`
//! 4. Built-in default

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DB_PATH_ENV: &str = "LIBRIS_DB";
pub const LOOKUP_URL_ENV: &str = "LIBRIS_LOOKUP_URL";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub lookup: LookupSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Canonical path to the settings file: `~/.config/libris/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("libris").join("settings.toml")
}

/// Default catalog database: `<data dir>/libris/catalog.db`.
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("libris").join("catalog.db")
}

impl Settings {
    /// Load the settings file, or defaults if it does not exist.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    /// Load settings from a specific file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the database path through the full priority chain.
    pub fn database_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        let env = std::env::var_os(DB_PATH_ENV).map(PathBuf::from);
        self.database_path_with(cli_override, env)
    }

    fn database_path_with(&self, cli_override: Option<PathBuf>, env: Option<PathBuf>) -> PathBuf {
        cli_override
            .or(env)
            .or_else(|| self.database.path.clone())
            .unwrap_or_else(default_database_path)
    }

    /// Resolve the lookup service root URL.
    pub fn lookup_url(&self) -> String {
        self.lookup_url_with(std::env::var(LOOKUP_URL_ENV).ok())
    }

    fn lookup_url_with(&self, env: Option<String>) -> String {
        env.filter(|url| !url.trim().is_empty())
            .or_else(|| self.lookup.base_url.clone())
            .unwrap_or_else(|| libris_lookup::DEFAULT_BASE_URL.to_string())
    }

    pub fn lookup_timeout(&self) -> Duration {
        self.lookup
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(libris_lookup::DEFAULT_TIMEOUT)
    }

    /// Pretty-printed TOML for display.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_beats_env_beats_file() {
        let settings = Settings {
            database: DatabaseSettings {
                path: Some(PathBuf::from("/file.db")),
            },
            ..Default::default()
        };

        let cli = Some(PathBuf::from("/cli.db"));
        let env = Some(PathBuf::from("/env.db"));
        assert_eq!(
            settings.database_path_with(cli, env.clone()),
            PathBuf::from("/cli.db")
        );
        assert_eq!(
            settings.database_path_with(None, env),
            PathBuf::from("/env.db")
        );
        assert_eq!(
            settings.database_path_with(None, None),
            PathBuf::from("/file.db")
        );
    }

    #[test]
    fn database_defaults_to_data_dir() {
        let settings = Settings::default();
        let path = settings.database_path_with(None, None);
        assert!(path.ends_with("libris/catalog.db"));
    }

    #[test]
    fn lookup_url_priority() {
        let mut settings = Settings::default();
        assert_eq!(settings.lookup_url_with(None), "https://openlibrary.org");

        settings.lookup.base_url = Some("http://mirror.local".to_string());
        assert_eq!(settings.lookup_url_with(None), "http://mirror.local");
        assert_eq!(
            settings.lookup_url_with(Some("http://env.local".to_string())),
            "http://env.local"
        );
        assert_eq!(
            settings.lookup_url_with(Some("  ".to_string())),
            "http://mirror.local"
        );
    }
}
