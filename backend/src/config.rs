//! Configuration management for the weather dashboard server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with DASHBOARD_ prefix
//!
//! The upstream credential is additionally read from the provider's
//! conventional variables, see [`API_KEY_ENV_VARS`].

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::types::{Language, LanguageError, Location};

use crate::poller::DEFAULT_POLL_INTERVAL;

/// Environment variables consulted for the provider credential, in order.
/// The first non-empty value wins.
pub const API_KEY_ENV_VARS: [&str; 2] = ["OPENWEATHER_API_KEY", "VITE_OPENWEATHER_API_KEY"];

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Upstream weather provider configuration
    pub weather: WeatherConfig,

    /// The single location this dashboard reports on
    pub location: LocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Provider base URL, without trailing slash
    pub api_base_url: String,

    /// Provider API key; absent means every upstream call fails
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout for upstream calls
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Offset of the city's local time from UTC, used for calendar dates
    pub utc_offset_seconds: i32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("DASHBOARD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("weather.api_base_url", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.request_timeout_secs", 10)?
            .set_default("location.city", "Boujdour")?
            .set_default("location.country", "Morocco")?
            .set_default("location.latitude", 26.1265)?
            .set_default("location.longitude", -14.4815)?
            .set_default("location.utc_offset_seconds", 3600)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (DASHBOARD_ prefix)
            .add_source(
                Environment::with_prefix("DASHBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        config.weather.api_key = config
            .weather
            .resolve_api_key(|name| std::env::var(name).ok());

        if let Err(msg) =
            shared::validation::validate_coordinates(config.location.latitude, config.location.longitude)
        {
            return Err(ConfigError::Message(msg.to_string()));
        }

        Ok(config)
    }
}

impl WeatherConfig {
    /// Resolve the credential: the provider variables first, then the
    /// configured value. Empty strings count as absent.
    pub fn resolve_api_key<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl LocationConfig {
    pub fn location(&self) -> Location {
        Location {
            city: self.city.clone(),
            country: self.country.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Configuration for the `weather-watch` polling client
#[derive(Debug, Deserialize, Clone)]
pub struct WatchConfig {
    /// Base URL of a running weather server
    pub server_url: String,

    /// Display language code (en, fr, ar)
    pub language: String,

    /// Seconds between scheduled refreshes
    pub poll_interval_secs: u64,

    /// Per-request timeout for the aggregate call
    pub request_timeout_secs: u64,
}

impl WatchConfig {
    /// Load from defaults, `config/watch` and `WATCH__*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        config::Config::builder()
            .set_default("server_url", "http://localhost:5000")?
            .set_default("language", "en")?
            .set_default("poll_interval_secs", DEFAULT_POLL_INTERVAL.as_secs())?
            .set_default("request_timeout_secs", 30)?
            .add_source(File::with_name("config/watch").required(false))
            .add_source(
                Environment::with_prefix("WATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn language(&self) -> Result<Language, LanguageError> {
        self.language.parse()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
