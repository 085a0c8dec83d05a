//! The pkglab home-directory config file: `{version, port, prune_keep}`.
//!
//! This is deliberately a tiny hand-rolled schema rather than a
//! [`super::ConfigManager`] layer: the file has exactly two user-facing
//! fields and one schema tag, and the only "layering" needed is "create
//! defaults if absent, refuse a legacy format outright".

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};

const CURRENT_SCHEMA_VERSION: u32 = 1;
const DEFAULT_PORT: u16 = 4873;
const DEFAULT_PRUNE_KEEP: u32 = 5;

/// The pkglab home-directory config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Schema version tag; only `1` is understood by this build.
    pub version: u32,
    /// Port the registry daemon listens on.
    pub port: u16,
    /// Number of marker versions to retain per `(package, tag)` on prune.
    pub prune_keep: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { version: CURRENT_SCHEMA_VERSION, port: DEFAULT_PORT, prune_keep: DEFAULT_PRUNE_KEEP }
    }
}

impl AppConfig {
    /// Loads the config at `path`, creating it with defaults if absent.
    ///
    /// # Errors
    /// Returns [`ConfigError::LegacyFormat`] if the file parses as JSON but
    /// lacks a `version` field (the pre-v1 YAML-era marker), or
    /// [`ConfigError::FileReadError`] / [`ConfigError::ParseError`] on other
    /// I/O or malformed-JSON failures.
    pub fn load_or_init(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileReadError { path: path.to_path_buf(), message: e.to_string() })?;

        let value: Value = serde_json::from_str(&raw).map_err(|e| {
            ConfigError::ParseError { format: "JSON".to_string(), message: e.to_string() }
        })?;

        if value.get("version").is_none() {
            return Err(ConfigError::LegacyFormat { path: path.to_path_buf() });
        }

        serde_json::from_value(value)
            .map_err(|e| ConfigError::ParseError { format: "JSON".to_string(), message: e.to_string() })
    }

    /// Writes this config to `path` as pretty JSON, creating parent
    /// directories as needed.
    ///
    /// # Errors
    /// Returns [`ConfigError::FileWriteError`] on I/O failure or
    /// [`ConfigError::SerializeError`] if serialization somehow fails.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::FileWriteError { path: parent.to_path_buf(), message: e.to_string() })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            format: "JSON".to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(path, json)
            .map_err(|e| ConfigError::FileWriteError { path: path.to_path_buf(), message: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_creates_defaults() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("config.json");
        let config = AppConfig::load_or_init(&path).expect("load_or_init");
        assert_eq!(config, AppConfig::default());
        assert!(path.is_file());
    }

    #[test]
    fn legacy_format_without_version_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"port": 4873}"#).expect("write");
        let err = AppConfig::load_or_init(&path).unwrap_err();
        assert!(matches!(err, ConfigError::LegacyFormat { .. }));
    }

    #[test]
    fn round_trips_custom_values() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("config.json");
        let config = AppConfig { version: 1, port: 5000, prune_keep: 10 };
        config.save(&path).expect("save");
        let loaded = AppConfig::load_or_init(&path).expect("load_or_init");
        assert_eq!(loaded, config);
    }
}
