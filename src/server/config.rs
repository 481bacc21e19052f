/**
 * Server Configuration
 *
 * Loads and validates server configuration from the environment, and sets
 * up the SQLite connection pool with embedded migrations.
 *
 * # Recognized Variables
 *
 * - `ACCESS_SECRET` / `ACCESS_TTL` - access-token signing secret and TTL
 *   in seconds (default 900)
 * - `REFRESH_SECRET` / `REFRESH_TTL` - refresh-token signing secret and
 *   TTL in days (default 7000); the cookie max-age is `86400 * days`
 * - `SERVER_PORT` - listen port (default 3000)
 * - `DATABASE_URL` - SQLite URL (default in-memory)
 * - `OPENAI_API_KEY` - optional; absent disables the generation endpoints
 *
 * A missing or empty signing secret is a fatal configuration error; the
 * server refuses to start rather than sign tokens with an empty key.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

/// Configuration failures, all fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is absent or empty
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    /// A variable is present but unparseable
    #[error("invalid value for {name}: {value}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// The offending value
        value: String,
    },
}

/// Token-issuance configuration
///
/// Access and refresh settings are fully independent so the two token
/// classes never share a secret or a lifetime.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Access-token signing secret
    pub access_secret: String,
    /// Access-token TTL in seconds
    pub access_ttl_secs: u64,
    /// Refresh-token signing secret
    pub refresh_secret: String,
    /// Refresh-token TTL in days
    pub refresh_ttl_days: u64,
}

impl AuthConfig {
    /// Default access-token TTL: 15 minutes
    pub const DEFAULT_ACCESS_TTL_SECS: u64 = 900;
    /// Default refresh-token TTL in days
    pub const DEFAULT_REFRESH_TTL_DAYS: u64 = 7000;

    /// Load token configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            access_secret: require_secret("ACCESS_SECRET")?,
            access_ttl_secs: optional_u64("ACCESS_TTL", Self::DEFAULT_ACCESS_TTL_SECS)?,
            refresh_secret: require_secret("REFRESH_SECRET")?,
            refresh_ttl_days: optional_u64("REFRESH_TTL", Self::DEFAULT_REFRESH_TTL_DAYS)?,
        })
    }

    /// Refresh-cookie max-age in seconds
    pub fn refresh_max_age_secs(&self) -> u64 {
        86400 * self.refresh_ttl_days
    }

    /// Fixed small config for unit tests
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            access_secret: "access-test-secret".to_string(),
            access_ttl_secs: Self::DEFAULT_ACCESS_TTL_SECS,
            refresh_secret: "refresh-test-secret".to_string(),
            refresh_ttl_days: 7,
        }
    }
}

/// Top-level server configuration, constructed once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port
    pub port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// Token-issuance settings
    pub auth: AuthConfig,
    /// Generation-provider API key; `None` disables those endpoints
    pub openai_api_key: Option<String>,
}

impl ServerConfig {
    /// Load the full server configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("SERVER_PORT") {
            Ok(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value,
            })?,
            Err(_) => 3000,
        };

        Ok(Self {
            port,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite::memory:".to_string()),
            auth: AuthConfig::from_env()?,
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
        })
    }
}

fn require_secret(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn optional_u64(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Connect to the database and run embedded migrations
///
/// In-memory databases are pinned to a single connection so every query
/// sees the same store.
pub async fn connect_database(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    // An in-memory database lives and dies with its connection, so pin the
    // pool to a single connection that is never recycled.
    let pool_options = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    let pool = pool_options.connect_with(options).await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// Fresh in-memory database for unit tests
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    connect_database("sqlite::memory:")
        .await
        .expect("in-memory database")
}
