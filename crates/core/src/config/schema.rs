//! Configuration schema definitions

use crate::error::{ProcessError, Result};
use crate::nearby::AnchorStrategy;
use crate::share::DEFAULT_APP_URL;
use crate::table::columns;
use pingrank_geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub reference: ReferenceConfig,

    #[serde(default)]
    pub nearby: NearbyConfig,

    #[serde(default)]
    pub share: ShareConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Reject values the pipeline would refuse anyway.
    pub fn validate(&self) -> Result<()> {
        if !self.reference.coordinate().is_valid() {
            return Err(ProcessError::config(format!(
                "reference point ({}, {}) is outside the valid coordinate range",
                self.reference.latitude, self.reference.longitude
            )));
        }
        if !(self.nearby.radius_km.is_finite() && self.nearby.radius_km > 0.0) {
            return Err(ProcessError::config(format!(
                "nearby.radius_km must be positive, got {}",
                self.nearby.radius_km
            )));
        }
        if self.nearby.timestamp_column.trim().is_empty() {
            return Err(ProcessError::config("nearby.timestamp_column must not be empty"));
        }
        Ok(())
    }
}

/// Reference point distances are measured from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReferenceConfig {
    #[serde(default)]
    pub latitude: f64,

    #[serde(default)]
    pub longitude: f64,
}

impl ReferenceConfig {
    /// The configured point as a coordinate
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }
}

/// Anchor selection mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorMode {
    /// Last valid row in file order
    #[default]
    LastRow,
    /// Latest value in `timestamp_column`
    LatestTimestamp,
}

/// Nearby clustering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbyConfig {
    /// Clustering radius in kilometers
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,

    /// How the anchor record is chosen
    #[serde(default)]
    pub anchor: AnchorMode,

    /// Column read when `anchor = "latest-timestamp"`
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
}

impl NearbyConfig {
    /// The strategy the nearby query should use
    pub fn anchor_strategy(&self) -> AnchorStrategy {
        match self.anchor {
            AnchorMode::LastRow => AnchorStrategy::LastRow,
            AnchorMode::LatestTimestamp => AnchorStrategy::LatestTimestamp {
                column: self.timestamp_column.clone(),
            },
        }
    }
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
            anchor: AnchorMode::default(),
            timestamp_column: default_timestamp_column(),
        }
    }
}

fn default_radius_km() -> f64 {
    10.0
}

fn default_timestamp_column() -> String {
    columns::TIMESTAMP.to_string()
}

/// Share link configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareConfig {
    #[serde(default = "default_app_url")]
    pub app_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            app_url: default_app_url(),
        }
    }
}

fn default_app_url() -> String {
    DEFAULT_APP_URL.to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let schema = ConfigSchema::default();
        assert_eq!(schema.nearby.radius_km, 10.0);
        assert_eq!(schema.nearby.anchor, AnchorMode::LastRow);
        assert_eq!(schema.nearby.timestamp_column, "Timestamp");
        assert_eq!(schema.share.app_url, DEFAULT_APP_URL);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [reference]
            latitude = 40.7128
            longitude = -74.0060

            [nearby]
            anchor = "latest-timestamp"
            "#,
        )
        .unwrap();

        assert_eq!(schema.reference.coordinate(), Coordinate::new(40.7128, -74.0060));
        assert_eq!(schema.nearby.radius_km, 10.0);
        assert_eq!(
            schema.nearby.anchor_strategy(),
            AnchorStrategy::LatestTimestamp { column: "Timestamp".into() }
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut schema = ConfigSchema::default();
        schema.nearby.radius_km = 0.0;
        assert!(schema.validate().is_err());

        let mut schema = ConfigSchema::default();
        schema.reference.latitude = -100.0;
        assert!(matches!(schema.validate(), Err(ProcessError::Config(_))));
    }
}
