//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `POKEMART_API_BASE_URL` - PokeAPI base URL (default: <https://pokeapi.co/api/v2/>)
//! - `POKEMART_CATALOG_LIMIT` - Number of catalog entries to load (default: 151)
//! - `POKEMART_FETCH_CONCURRENCY` - Detail fetches in flight (default: 16)
//! - `POKEMART_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `POKEMART_STORE_PATH` - Durable cart store file (default: `.pokemart/store.json`)
//! - `POKEMART_HOST` - Bind address (default: 127.0.0.1)
//! - `POKEMART_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2/";
const DEFAULT_CATALOG_LIMIT: u32 = 151;
const DEFAULT_FETCH_CONCURRENCY: usize = 16;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STORE_PATH: &str = ".pokemart/store.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Remote catalog source configuration
    pub catalog: CatalogConfig,
    /// Durable key-value store file holding the cart snapshot
    pub store_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// PokeAPI catalog source configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL, always ending in `/`
    pub api_base_url: Url,
    /// Number of entries requested from the listing endpoint
    pub limit: u32,
    /// Maximum detail fetches in flight
    pub concurrency: usize,
    /// Timeout applied to every request
    pub request_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default("POKEMART_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_env_or_default("POKEMART_PORT", 3000u16)?;
        let catalog = CatalogConfig::from_env()?;
        let store_path = store_path_from_env();

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0);

        Ok(Self {
            host,
            port,
            catalog,
            store_path,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    /// Default settings against `api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_base_url` is not an absolute URL.
    pub fn new(api_base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            api_base_url: base_url(api_base_url)?,
            limit: DEFAULT_CATALOG_LIMIT,
            concurrency: DEFAULT_FETCH_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    /// Load the catalog source settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = base_url(&get_env_or_default(
            "POKEMART_API_BASE_URL",
            DEFAULT_API_BASE_URL,
        ))
        .map_err(|e| {
            ConfigError::InvalidEnvVar("POKEMART_API_BASE_URL".to_string(), e.to_string())
        })?;

        let limit = parse_env_or_default("POKEMART_CATALOG_LIMIT", DEFAULT_CATALOG_LIMIT)?;
        let concurrency =
            parse_env_or_default("POKEMART_FETCH_CONCURRENCY", DEFAULT_FETCH_CONCURRENCY)?;
        if concurrency == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "POKEMART_FETCH_CONCURRENCY".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let timeout_secs =
            parse_env_or_default("POKEMART_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Self {
            api_base_url,
            limit,
            concurrency,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Durable store path from `POKEMART_STORE_PATH`, or the default.
#[must_use]
pub fn store_path_from_env() -> PathBuf {
    PathBuf::from(get_env_or_default("POKEMART_STORE_PATH", DEFAULT_STORE_PATH))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a base URL, appending a trailing `/` so relative joins keep the path.
fn base_url(raw: &str) -> Result<Url, url::ParseError> {
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{raw}/"))
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
