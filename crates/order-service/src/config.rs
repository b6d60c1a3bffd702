//! Application configuration loaded from environment variables.

use std::time::Duration;

/// Order service configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `8082`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DATABASE_URL`: PostgreSQL connection string; in-memory store when unset
/// - `USER_SERVICE_URL`: user directory base URL (default: `"http://localhost:8081"`)
/// - `PAYMENT_SERVICE_URL`: payment processor base URL (default: `"http://localhost:8083"`)
/// - `UPSTREAM_TIMEOUT_MS`: per-request timeout for both (default: `5000`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
    pub user_service_url: String,
    pub payment_service_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// missing or unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            user_service_url: lookup("USER_SERVICE_URL").unwrap_or(defaults.user_service_url),
            payment_service_url: lookup("PAYMENT_SERVICE_URL")
                .unwrap_or(defaults.payment_service_url),
            upstream_timeout: lookup("UPSTREAM_TIMEOUT_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.upstream_timeout),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
            log_level: "info".to_string(),
            database_url: None,
            user_service_url: "http://localhost:8081".to_string(),
            payment_service_url: "http://localhost:8083".to_string(),
            upstream_timeout: Duration::from_millis(5000),
        }
    }
}
