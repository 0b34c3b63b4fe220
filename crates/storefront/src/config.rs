//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `BOUTIQUE_HOST` - Bind address (default: 127.0.0.1)
//! - `BOUTIQUE_PORT` - Listen port (default: 3000)
//! - `BOUTIQUE_STORAGE_DIR` - Directory for persisted cart and wishlist.
//!   When unset, shopper state lives in memory only.
//! - `BOUTIQUE_CATALOG_PATH` - Catalog document
//!   (default: crates/storefront/data/products.json)
//! - `BOUTIQUE_NOTIFICATION_MS` - Notification auto-dismiss delay in
//!   milliseconds, 0 to disable (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::state::notification::DEFAULT_DURATION;

/// Default catalog location, relative to the workspace root.
pub const DEFAULT_CATALOG_PATH: &str = "crates/storefront/data/products.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory backing the shopper's persistent storage
    pub storage_dir: Option<PathBuf>,
    /// Catalog document path
    pub catalog_path: PathBuf,
    /// Notification auto-dismiss delay
    pub notification_duration: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            storage_dir: None,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            notification_duration: DEFAULT_DURATION,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_ms =
            u64::try_from(defaults.notification_duration.as_millis()).unwrap_or(u64::MAX);
        let notification_ms: u64 = parse_or(&lookup, "BOUTIQUE_NOTIFICATION_MS", default_ms)?;

        Ok(Self {
            host: parse_or(&lookup, "BOUTIQUE_HOST", defaults.host)?,
            port: parse_or(&lookup, "BOUTIQUE_PORT", defaults.port)?,
            storage_dir: non_empty(&lookup, "BOUTIQUE_STORAGE_DIR").map(PathBuf::from),
            catalog_path: non_empty(&lookup, "BOUTIQUE_CATALOG_PATH")
                .map_or(defaults.catalog_path, PathBuf::from),
            notification_duration: Duration::from_millis(notification_ms),
            sentry_dsn: non_empty(&lookup, "SENTRY_DSN"),
            sentry_environment: non_empty(&lookup, "SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or(&lookup, "SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: parse_or(
                &lookup,
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry_traces_sample_rate,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable, treating an empty value as unset.
fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Parse a variable, falling back to `default` when unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    non_empty(lookup, key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert!(config.storage_dir.is_none());
        assert_eq!(config.notification_duration, DEFAULT_DURATION);
    }

    #[test]
    fn test_notification_delay_override() {
        let config =
            StorefrontConfig::from_lookup(lookup(&[("BOUTIQUE_NOTIFICATION_MS", "1500")])).unwrap();
        assert_eq!(config.notification_duration, Duration::from_millis(1500));
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("BOUTIQUE_HOST", "0.0.0.0"),
            ("BOUTIQUE_PORT", "8080"),
            ("BOUTIQUE_STORAGE_DIR", "/var/lib/boutique"),
            ("BOUTIQUE_CATALOG_PATH", "/srv/products.json"),
            ("BOUTIQUE_NOTIFICATION_MS", "0"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.storage_dir, Some(PathBuf::from("/var/lib/boutique")));
        assert_eq!(config.catalog_path, PathBuf::from("/srv/products.json"));
        assert!(config.notification_duration.is_zero());
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("BOUTIQUE_STORAGE_DIR", ""),
            ("SENTRY_DSN", "  "),
        ]))
        .unwrap();
        assert!(config.storage_dir.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = StorefrontConfig::from_lookup(lookup(&[("BOUTIQUE_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "BOUTIQUE_PORT"));
    }

    #[test]
    fn test_invalid_notification_delay() {
        let result = StorefrontConfig::from_lookup(lookup(&[("BOUTIQUE_NOTIFICATION_MS", "-5")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
