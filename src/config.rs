//! config
//!
//! Tunable settings and their loading.
//!
//! # Overview
//!
//! Settings are read from a TOML file. Every field has a default, so an empty
//! file (or no file at all) yields [`Config::default`]. Unknown keys are
//! rejected, and values are validated after parsing.
//!
//! # Locations
//!
//! [`Config::load_from_env`] reads the file named by `$SEQSCOPE_CONFIG` if
//! it is set and exists, and falls back to defaults otherwise.
//!
//! # Example
//!
//! ```toml
//! [stream]
//! copy_buffer_size = 65536
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SEQSCOPE_CONFIG";

/// Default chunk size for stream copies.
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 81920;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Stream wrapper settings
    pub stream: StreamSettings,
}

/// Settings for [`OwnershipStream`](crate::stream::OwnershipStream).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StreamSettings {
    /// Chunk size used by `copy_to` and `copy_to_async` (must be at least 1)
    pub copy_buffer_size: usize,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
        }
    }
}

impl StreamSettings {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.copy_buffer_size == 0 {
            return Err(ConfigError::InvalidValue(
                "stream.copy_buffer_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stream.validate()
    }

    /// Parse and validate TOML text.
    ///
    /// Parse errors carry an empty path.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, Path::new(""))
    }

    /// Read, parse, and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds an
    /// invalid value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::parse(&contents, path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from `$SEQSCOPE_CONFIG`, or use defaults if it is unset or
    /// points at a missing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the named file exists but cannot be parsed.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::load_if_exists(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    fn load_if_exists(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_text_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.stream.copy_buffer_size, DEFAULT_COPY_BUFFER_SIZE);
    }

    #[test]
    fn parses_stream_section() {
        let config = Config::from_toml_str(
            r#"
            [stream]
            copy_buffer_size = 4096
            "#,
        )
        .unwrap();
        assert_eq!(config.stream.copy_buffer_size, 4096);
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = Config::from_toml_str(
            r#"
            [stream]
            buffer = 10
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn rejects_zero_buffer() {
        let result = Config::from_toml_str(
            r#"
            [stream]
            copy_buffer_size = 0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[stream]\ncopy_buffer_size = 512\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.stream.copy_buffer_size, 512);
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(temp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn parse_error_names_the_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.toml");
        fs::write(&path, "[stream\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn missing_optional_path_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_if_exists(Some(temp.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::load_if_exists(None).unwrap(), Config::default());
    }

    #[test]
    fn load_from_env_var() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[stream]\ncopy_buffer_size = 7\n").unwrap();

        std::env::set_var(CONFIG_ENV, &path);
        let config = Config::load_from_env().unwrap();
        std::env::remove_var(CONFIG_ENV);

        assert_eq!(config.stream.copy_buffer_size, 7);
    }
}
