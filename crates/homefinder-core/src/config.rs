//! `Homefinder` Configuration Module
//!
//! Provides configuration file support via `homefinder.toml`, environment
//! variables, and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (CLI flags)
//! 2. Environment variables (`HOMEFINDER_<SECTION>__<KEY>`)
//! 3. Configuration file (`homefinder.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Index construction section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Width of each price bin.
    pub price_bin: u64,
    /// Initial slot count of each posting map.
    pub initial_capacity: usize,
    /// Posting map load factor that triggers doubling.
    pub load_factor: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            price_bin: 50_000,
            initial_capacity: crate::hash_table::DEFAULT_CAPACITY,
            load_factor: crate::hash_table::DEFAULT_LOAD_FACTOR,
        }
    }
}

/// Query defaults section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Lower price bound applied when a query gives none.
    pub price_min: f64,
    /// Upper price bound applied when a query gives none (`None` = unbounded).
    pub price_max: Option<f64>,
    /// Maximum records rendered per query.
    pub max_results: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            price_min: 0.0,
            price_max: None,
            max_results: 50,
        }
    }
}

/// Source column names section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Bedroom count column.
    pub bedrooms: String,
    /// Full-bath count column.
    pub fullbaths: String,
    /// Sale price column.
    pub price: String,
    /// Building age column (years before 2018).
    pub age: String,
    /// Basement code column (1 = none).
    pub basement: String,
    /// Fireplace count column.
    pub fireplaces: String,
    /// Attic type column (0 = none).
    pub attic: String,
    /// Garage indicator column.
    pub garage: String,
    /// Street address column.
    pub address: String,
    /// Building square feet column.
    pub building_sqft: String,
    /// Latitude column.
    pub latitude: String,
    /// Longitude column.
    pub longitude: String,
    /// Combined `"(lat, lon)"` column used when latitude/longitude are absent.
    pub location: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            bedrooms: "Bedrooms".to_string(),
            fullbaths: "Full Baths".to_string(),
            price: "Sale Price Clean".to_string(),
            age: "Age".to_string(),
            basement: "Basement".to_string(),
            fireplaces: "Fireplaces".to_string(),
            attic: "Attic Type".to_string(),
            garage: "Garage indicator".to_string(),
            address: "Property Address".to_string(),
            building_sqft: "Building Square Feet".to_string(),
            latitude: "Latitude".to_string(),
            longitude: "Longitude".to_string(),
            location: "Location".to_string(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main `Homefinder` configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HomefinderConfig {
    /// Index construction.
    pub index: IndexConfig,
    /// Query defaults.
    pub query: QueryConfig,
    /// Source column names.
    pub columns: ColumnConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl HomefinderConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("homefinder.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("HOMEFINDER_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index.price_bin == 0 {
            return Err(invalid("index.price_bin", "value must be greater than 0"));
        }

        if self.index.initial_capacity == 0 {
            return Err(invalid(
                "index.initial_capacity",
                "value must be greater than 0",
            ));
        }

        if !(self.index.load_factor > 0.0 && self.index.load_factor <= 1.0) {
            return Err(invalid(
                "index.load_factor",
                format!("value {} is out of range (0, 1]", self.index.load_factor),
            ));
        }

        if !(self.query.price_min.is_finite() && self.query.price_min >= 0.0) {
            return Err(invalid(
                "query.price_min",
                format!("value {} must be a finite, non-negative price", self.query.price_min),
            ));
        }

        if let Some(max) = self.query.price_max {
            if max.is_nan() || max < self.query.price_min {
                return Err(invalid(
                    "query.price_max",
                    format!("value {max} must be >= query.price_min"),
                ));
            }
        }

        if self.query.max_results == 0 || self.query.max_results > 10_000 {
            return Err(invalid(
                "query.max_results",
                format!("value {} is out of range [1, 10000]", self.query.max_results),
            ));
        }

        for (key, name) in [
            ("columns.bedrooms", &self.columns.bedrooms),
            ("columns.fullbaths", &self.columns.fullbaths),
            ("columns.price", &self.columns.price),
        ] {
            if name.trim().is_empty() {
                return Err(invalid(key, "column name must not be empty"));
            }
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(invalid(
                "logging.level",
                format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            ));
        }

        Ok(())
    }

    /// Effective upper price bound (`+inf` when unset).
    #[must_use]
    pub fn effective_price_max(&self) -> f64 {
        self.query.price_max.unwrap_or(f64::INFINITY)
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}
