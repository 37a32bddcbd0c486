//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GAMEVERSE_STORE_PATH` - JSON file backing the key-value store
//!   (default: `.gameverse/storage.json`)
//! - `GAMEVERSE_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)
//!
//! The tax rate and shipping prices are fixed and not configurable.

use std::path::PathBuf;

use thiserror::Error;

/// Default location of the store file.
pub const DEFAULT_STORE_PATH: &str = ".gameverse/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Path of the JSON store file
    pub store_path: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_path = lookup("GAMEVERSE_STORE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from);

        let log_format = lookup("GAMEVERSE_LOG_FORMAT")
            .map(|raw| {
                raw.parse::<LogFormat>().map_err(|e| {
                    ConfigError::InvalidEnvVar("GAMEVERSE_LOG_FORMAT".to_string(), e)
                })
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            store_path,
            log_format,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            log_format: LogFormat::default(),
        }
    }
}
