//! Configuration for the Goodwill service.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. Environment variables (`GOODWILL_DATABASE_URL`,
//!    `GOODWILL_DATABASE_MAX_CONNECTIONS`, `GOODWILL_LOG`)
//! 2. TOML config file (explicit path only)
//! 3. Compiled defaults

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`DatabaseConfig::url`].
pub const DATABASE_URL_ENV: &str = "GOODWILL_DATABASE_URL";
/// Environment variable overriding [`DatabaseConfig::max_connections`].
pub const DATABASE_MAX_CONNECTIONS_ENV: &str = "GOODWILL_DATABASE_MAX_CONNECTIONS";
/// Environment variable overriding [`LoggingConfig::level`].
pub const LOG_LEVEL_ENV: &str = "GOODWILL_LOG";

/// Errors that can occur when loading configuration or building resources
/// from it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A setting holds a value outside its domain.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Setting name.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// The database pool could not be built.
    #[error("failed to build database pool: {0}")]
    Pool(#[from] PoolError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GoodwillConfigFile {
    database: DatabaseFileConfig,
    logging: LoggingFileConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DatabaseFileConfig {
    url: Option<String>,
    max_connections: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingFileConfig {
    level: Option<String>,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/goodwill".to_owned(),
            max_connections: 8,
        }
    }
}

impl DatabaseConfig {
    /// Builds the connection pool shared by the `PostgreSQL` adapters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the pool cannot establish its
    /// initial connections.
    pub fn build_pool(&self) -> Result<Pool<ConnectionManager<PgConnection>>, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(&self.url);
        let pool = Pool::builder()
            .max_size(self.max_connections)
            .build(manager)?;
        Ok(pool)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoodwillConfig {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl GoodwillConfig {
    /// Loads configuration from the process environment and an optional
    /// TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read or
    /// parsed, or an environment override is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Loads configuration reading environment overrides through `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read or
    /// parsed, or an environment override is malformed.
    pub fn load_with_env<E>(path: Option<&Path>, env: E) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let file = path.map(read_config_file).transpose()?.unwrap_or_default();
        Self::resolve(file, env)
    }

    fn resolve<E>(file: GoodwillConfigFile, env: E) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let max_connections = env(DATABASE_MAX_CONNECTIONS_ENV)
            .map(|raw| parse_max_connections(&raw))
            .transpose()?
            .or(file.database.max_connections)
            .unwrap_or(defaults.database.max_connections);
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.max_connections".to_owned(),
                value: max_connections.to_string(),
            });
        }

        Ok(Self {
            database: DatabaseConfig {
                url: env(DATABASE_URL_ENV)
                    .or(file.database.url)
                    .unwrap_or(defaults.database.url),
                max_connections,
            },
            logging: LoggingConfig {
                level: env(LOG_LEVEL_ENV)
                    .or(file.logging.level)
                    .unwrap_or(defaults.logging.level),
            },
        })
    }
}

fn parse_max_connections(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidValue {
            key: DATABASE_MAX_CONNECTIONS_ENV.to_owned(),
            value: raw.to_owned(),
        })
}

fn read_config_file(path: &Path) -> Result<GoodwillConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}
