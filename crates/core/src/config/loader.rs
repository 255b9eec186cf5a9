//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{ProcessError, Result};
use std::path::Path;

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(String::from)
            .or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        schema.validate()?;

        tracing::debug!(path = ?config_path, "Configuration loaded");

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn defaults() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [".pingrank.toml", "pingrank.toml", ".config/pingrank.toml"];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ProcessError::config(format!("Failed to read config file {}: {}", path, e)))?;

    toml::from_str(&content)
        .map_err(|e| ProcessError::config(format!("Failed to parse config file {}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert!(config.path.is_none());
        assert_eq!(config.schema.nearby.radius_km, 10.0);
    }

    #[test]
    fn test_config_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pingrank.toml");
        std::fs::write(&path, "[nearby]\nradius_km = 25.0\n").unwrap();

        let config = Config::load(path.to_str()).unwrap();
        assert_eq!(config.schema.nearby.radius_km, 25.0);
        assert_eq!(config.path.as_deref(), path.to_str());
    }

    #[test]
    fn test_config_missing_explicit_file_is_error() {
        let err = Config::load(Some("/no/such/pingrank.toml")).unwrap_err();
        assert!(matches!(err, ProcessError::Config(_)));
    }

    #[test]
    fn test_config_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[nearby\nradius_km = ").unwrap();

        assert!(Config::load(path.to_str()).is_err());
    }

    #[test]
    fn test_config_invalid_values_are_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("neg.toml");
        std::fs::write(&path, "[nearby]\nradius_km = -1.0\n").unwrap();

        assert!(Config::load(path.to_str()).is_err());
    }
}
