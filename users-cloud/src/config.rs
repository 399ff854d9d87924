//! Users service configuration

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABASE_URL or DB_HOST + DB_NAME must be set")]
    MissingDatabase,
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Where the pool connects to
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// Full connection string (`DATABASE_URL`)
    Url(String),
    /// Discrete connection parameters (`DB_HOST`, `DB_PORT`, ...)
    Parts {
        host: String,
        port: u16,
        name: String,
        user: String,
        password: String,
    },
}

// Keeps credentials out of logs
impl std::fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(_) => f.write_str("Url(<redacted>)"),
            Self::Parts {
                host, port, name, ..
            } => write!(f, "Parts({host}:{port}/{name})"),
        }
    }
}

/// Users service configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_URL | - | PostgreSQL connection URL |
/// | DB_HOST / DB_PORT / DB_NAME / DB_USER / DB_PASSWORD | - / 5432 / - / postgres / empty | used when DATABASE_URL is absent |
/// | HTTP_PORT (or PORT) | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | DB_MAX_CONNECTIONS | 20 | pool size |
/// | DB_ACQUIRE_TIMEOUT_MS | 2000 | wait for a free connection |
/// | DB_IDLE_TIMEOUT_MS | 30000 | idle connections are closed after this |
/// | PUBLIC_URL | http://localhost:{port} | server url in the OpenAPI document |
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseTarget,
    pub http_port: u16,
    pub environment: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub public_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = match lookup("DATABASE_URL") {
            Some(url) => DatabaseTarget::Url(url),
            None => match (lookup("DB_HOST"), lookup("DB_NAME")) {
                (Some(host), Some(name)) => DatabaseTarget::Parts {
                    host,
                    port: number(&lookup, "DB_PORT")?.unwrap_or(5432),
                    name,
                    user: lookup("DB_USER").unwrap_or_else(|| "postgres".into()),
                    password: lookup("DB_PASSWORD").unwrap_or_default(),
                },
                _ => return Err(ConfigError::MissingDatabase),
            },
        };

        let http_port = match number(&lookup, "HTTP_PORT")? {
            Some(port) => port,
            None => number(&lookup, "PORT")?.unwrap_or(3000),
        };

        Ok(Self {
            database,
            http_port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            max_connections: number(&lookup, "DB_MAX_CONNECTIONS")?.unwrap_or(20),
            acquire_timeout: Duration::from_millis(
                number(&lookup, "DB_ACQUIRE_TIMEOUT_MS")?.unwrap_or(2000),
            ),
            idle_timeout: Duration::from_millis(
                number(&lookup, "DB_IDLE_TIMEOUT_MS")?.unwrap_or(30_000),
            ),
            public_url: lookup("PUBLIC_URL")
                .unwrap_or_else(|| format!("http://localhost:{http_port}")),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name, value })
        })
        .transpose()
}
