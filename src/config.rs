//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Database settings mirror the options
//! `database`, `user`, `password`, `host` and `driver`, with `DATABASE_URL`
//! as a full override.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is not a valid socket address.
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    ListenAddr {
        /// Raw value.
        value: String,
        /// Parser error.
        source: std::net::AddrParseError,
    },

    /// `DB_DRIVER` names an unsupported backend.
    #[error("unknown DB_DRIVER {0:?} (expected mysql, postgres or memory)")]
    UnknownDriver(String),

    /// `LOG_FORMAT` names an unsupported formatter.
    #[error("unknown LOG_FORMAT {0:?} (expected text or json)")]
    UnknownLogFormat(String),
}

/// Persistence backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseDriver {
    /// MySQL / MariaDB through `sqlx`.
    #[default]
    MySql,
    /// PostgreSQL through `sqlx`.
    Postgres,
    /// Volatile in-process table.
    Memory,
}

impl FromStr for DatabaseDriver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::UnknownDriver(s.to_string())),
        }
    }
}

impl fmt::Display for DatabaseDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        })
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownLogFormat(s.to_string())),
        }
    }
}

/// Database connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Backend selector.
    pub driver: DatabaseDriver,
    /// Server host name.
    pub host: String,
    /// Server port; the driver default when `None`.
    pub port: Option<u16>,
    /// Database (schema) name.
    pub database: String,
    /// Login user.
    pub user: String,
    /// Login password. Empty means no password.
    pub password: String,
    /// Full connection URL; overrides the discrete options when set.
    pub url: Option<String>,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Minimum idle connections kept open.
    pub min_connections: u32,
    /// Seconds to wait when acquiring a connection.
    pub connect_timeout_secs: u64,
    /// Create the `salgado` table at startup if it is missing.
    pub ensure_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::MySql,
            host: "localhost".to_string(),
            port: None,
            database: "eb019_exemplo".to_string(),
            user: "root".to_string(),
            password: String::new(),
            url: None,
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 5,
            ensure_schema: true,
        }
    }
}

// Keeps the password and URL (which may embed it) out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("url", &self.url.as_ref().map(|_| "***"))
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("ensure_schema", &self.ensure_schema)
            .finish()
    }
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`ServiceConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Persistence settings.
    pub database: DatabaseConfig,

    /// Per-request timeout in seconds (0 = no timeout).
    pub request_timeout_secs: u64,

    /// Log output format.
    pub log_format: LogFormat,
}

impl ServiceConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `LISTEN_ADDR`, `DB_DRIVER` or
    /// `LOG_FORMAT` is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ServiceConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let listen_addr: SocketAddr = raw_addr
            .parse()
            .map_err(|source| ConfigError::ListenAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let defaults = DatabaseConfig::default();
        let driver = match lookup("DB_DRIVER") {
            Some(raw) => raw.parse()?,
            None => defaults.driver,
        };

        let database = DatabaseConfig {
            driver,
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port: lookup("DB_PORT").and_then(|v| v.parse().ok()),
            database: lookup("DB_NAME").unwrap_or(defaults.database),
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", defaults.min_connections),
            connect_timeout_secs: parse_or(
                &lookup,
                "DATABASE_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            ),
            ensure_schema: parse_bool_or(&lookup, "DB_ENSURE_SCHEMA", defaults.ensure_schema),
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            listen_addr,
            database,
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 0),
            log_format,
        })
    }
}

/// Parses `key` as `T`, returning `default` on missing or invalid values.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses `key` as a boolean. Accepts `"true"`, `"1"`, `"false"`, `"0"`
/// (case-insensitive). Returns `default` otherwise.
fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
