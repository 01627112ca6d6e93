//! User configuration loaded from `config.toml`.

use crate::calculator::MAX_FRACTION_DIGITS;
use crate::history::HISTORY_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Calculator settings. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store key the history list is saved under.
    pub history_key: String,
    /// Directory for the history store; the platform data dir when unset.
    pub data_dir: Option<PathBuf>,
    /// Fractional digits kept in displayed results.
    pub max_fraction_digits: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_key: HISTORY_KEY.to_string(),
            data_dir: None,
            max_fraction_digits: MAX_FRACTION_DIGITS,
        }
    }
}

impl Config {
    /// Default location: `~/.config/keycalc/config.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("keycalc").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("No config directory available, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml_str("max_fraction_digits = 4\n").unwrap();
        assert_eq!(config.max_fraction_digits, 4);
        assert_eq!(config.history_key, "calculatorHistory");
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(
            r#"
            history_key = "scratch"
            data_dir = "/tmp/keycalc"
            max_fraction_digits = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.history_key, "scratch");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/keycalc")));
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::from_toml_str("max_fraction_digits = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
