//! Server configuration

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Placeholder signing secret used when `ENVIRONMENT=development` and no secret is set
pub const DEV_TOKEN_SECRET: &str = "dev-ACCESS_TOKEN_SECRET-not-for-production";

/// `DATABASE_URL` value selecting the in-process document store
pub const MEMORY_DATABASE_URL: &str = "memory://";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be set in {environment} environment")]
    SecretRequired {
        name: &'static str,
        environment: String,
    },

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Where the document store lives
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// In-process store, nothing persisted
    Memory,
    /// Full PostgreSQL connection string
    Url(String),
    /// Connection assembled from discrete credentials
    Credentials {
        host: String,
        port: u16,
        user: String,
        password: String,
        database: String,
    },
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            Self::Url(_) => f.write_str("Url(<redacted>)"),
            Self::Credentials {
                host,
                port,
                user,
                database,
                ..
            } => f
                .debug_struct("Credentials")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("database", database)
                .finish_non_exhaustive(),
        }
    }
}

/// Server configuration
#[derive(Clone)]
pub struct Config {
    /// Bind host
    pub host: String,
    /// HTTP port
    pub port: u16,
    /// Document store location
    pub database: DatabaseConfig,
    /// Upper bound of the PostgreSQL pool
    pub db_max_connections: u32,
    /// HMAC secret for bearer tokens
    pub access_token_secret: String,
    /// Environment: development | staging | production
    pub environment: String,
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
    /// Directory for daily-rolling log files
    pub log_dir: Option<String>,
    /// JSON array of services imported when the catalog is empty
    pub catalog_seed_path: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("db_max_connections", &self.db_max_connections)
            .field("access_token_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("log_dir", &self.log_dir)
            .field("catalog_seed_path", &self.catalog_seed_path)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or("PORT", var("PORT"), 5000)?,
            database: Self::database_from(&var)?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS"), 10)?,
            access_token_secret: Self::require_secret(
                "ACCESS_TOKEN_SECRET",
                var("ACCESS_TOKEN_SECRET"),
                &environment,
            )?,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: parse_or("LOG_JSON", var("LOG_JSON"), false)?,
            log_dir: var("LOG_DIR"),
            catalog_seed_path: var("CATALOG_SEED_PATH").map(PathBuf::from),
            environment,
        })
    }

    /// Require a secret: must be set outside development.
    fn require_secret(
        name: &'static str,
        value: Option<String>,
        environment: &str,
    ) -> Result<String, ConfigError> {
        match value {
            Some(v) => Ok(v),
            None if environment == "development" => Ok(DEV_TOKEN_SECRET.to_string()),
            None => Err(ConfigError::SecretRequired {
                name,
                environment: environment.to_string(),
            }),
        }
    }

    /// `DATABASE_URL` wins; otherwise assemble from `DB_USER` / `DB_USER_PASS`
    fn database_from(var: &dyn Fn(&str) -> Option<String>) -> Result<DatabaseConfig, ConfigError> {
        if let Some(url) = var("DATABASE_URL") {
            return Ok(if url == MEMORY_DATABASE_URL {
                DatabaseConfig::Memory
            } else {
                DatabaseConfig::Url(url)
            });
        }

        let user = var("DB_USER").ok_or(ConfigError::Missing("DATABASE_URL or DB_USER"))?;
        let password = var("DB_USER_PASS").ok_or(ConfigError::Missing("DB_USER_PASS"))?;
        let (host, port) = match var("DB_HOST") {
            Some(raw) => split_host_port(&raw)?,
            None => ("localhost".to_string(), 5432),
        };

        Ok(DatabaseConfig::Credentials {
            host,
            port,
            user,
            password,
            database: var("DB_NAME").unwrap_or_else(|| "genius_car".into()),
        })
    }

    /// Whether the development placeholder secret is in use
    pub fn uses_placeholder_secret(&self) -> bool {
        self.access_token_secret == DEV_TOKEN_SECRET
    }

    /// `host:port` to bind
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn split_host_port(raw: &str) -> Result<(String, u16), ConfigError> {
    match raw.rsplit_once(':') {
        Some((host, port)) => {
            let port = port.parse().map_err(|_| ConfigError::Invalid {
                name: "DB_HOST",
                value: raw.to_string(),
            })?;
            Ok((host.to_string(), port))
        }
        None => Ok((raw.to_string(), 5432)),
    }
}
