//! Configuration management for the Farecast application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::FarecastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the Farecast application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarecastConfig {
    /// Prediction endpoint configuration
    #[serde(default)]
    pub prediction: PredictionConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default ride parameters shown in the form
    #[serde(default)]
    pub defaults: RideDefaults,
}

/// Prediction endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Base URL of the fare prediction service
    #[serde(default = "default_prediction_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_prediction_timeout")]
    pub timeout_seconds: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default ride parameters, pre-filled into the form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideDefaults {
    #[serde(default = "default_pickup_longitude")]
    pub pickup_longitude: f64,
    #[serde(default = "default_pickup_latitude")]
    pub pickup_latitude: f64,
    #[serde(default = "default_dropoff_longitude")]
    pub dropoff_longitude: f64,
    #[serde(default = "default_dropoff_latitude")]
    pub dropoff_latitude: f64,
    #[serde(default = "default_passenger_count")]
    pub passenger_count: u8,
}

// Default value functions
fn default_prediction_base_url() -> String {
    "https://taxifare-30694630212.europe-west1.run.app".to_string()
}

fn default_prediction_timeout() -> u32 {
    10
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_pickup_longitude() -> f64 {
    -73.777271
}

fn default_pickup_latitude() -> f64 {
    40.643714
}

fn default_dropoff_longitude() -> f64 {
    -73.965007
}

fn default_dropoff_latitude() -> f64 {
    40.776621
}

fn default_passenger_count() -> u8 {
    1
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            base_url: default_prediction_base_url(),
            timeout_seconds: default_prediction_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for RideDefaults {
    fn default() -> Self {
        Self {
            pickup_longitude: default_pickup_longitude(),
            pickup_latitude: default_pickup_latitude(),
            dropoff_longitude: default_dropoff_longitude(),
            dropoff_latitude: default_dropoff_latitude(),
            passenger_count: default_passenger_count(),
        }
    }
}

impl Default for FarecastConfig {
    fn default() -> Self {
        Self {
            prediction: PredictionConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            defaults: RideDefaults::default(),
        }
    }
}

impl FarecastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with FARECAST_ prefix
        builder = builder.add_source(
            Environment::with_prefix("FARECAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: FarecastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("farecast").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_ride_defaults()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.prediction.timeout_seconds == 0 {
            return Err(
                FarecastError::config("Prediction timeout must be at least 1 second").into(),
            );
        }

        if self.prediction.timeout_seconds > 300 {
            return Err(
                FarecastError::config("Prediction timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.port == 0 {
            return Err(FarecastError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FarecastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "compact"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(FarecastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.prediction.base_url.starts_with("http://")
            && !self.prediction.base_url.starts_with("https://")
        {
            return Err(FarecastError::config(
                "Prediction base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Validate the pre-filled ride defaults
    fn validate_ride_defaults(&self) -> Result<()> {
        let d = &self.defaults;

        for (name, latitude) in [
            ("pickup", d.pickup_latitude),
            ("dropoff", d.dropoff_latitude),
        ] {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(FarecastError::config(format!(
                    "Default {name} latitude must be between -90 and 90, got: {latitude}"
                ))
                .into());
            }
        }

        for (name, longitude) in [
            ("pickup", d.pickup_longitude),
            ("dropoff", d.dropoff_longitude),
        ] {
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(FarecastError::config(format!(
                    "Default {name} longitude must be between -180 and 180, got: {longitude}"
                ))
                .into());
            }
        }

        if !(1..=6).contains(&d.passenger_count) {
            return Err(FarecastError::config(format!(
                "Default passenger count must be between 1 and 6, got: {}",
                d.passenger_count
            ))
            .into());
        }

        Ok(())
    }
}
