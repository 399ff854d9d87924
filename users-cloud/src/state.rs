//! Application state for users-cloud

use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::config::{Config, DatabaseTarget};
use crate::db::{PgUserRepository, UserRepository};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// User persistence (PostgreSQL in production)
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Connect the pool, apply migrations and wire the repository
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .connect_with(connect_options(&config.database)?)
            .await?;
        tracing::info!(
            max_connections = config.max_connections,
            "Connected to PostgreSQL"
        );

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Table \"users\" ready");

        Ok(Self::with_repository(
            config.clone(),
            Arc::new(PgUserRepository::new(pool)),
        ))
    }

    pub fn with_repository(config: Config, users: Arc<dyn UserRepository>) -> Self {
        Self {
            config: Arc::new(config),
            users,
        }
    }
}

fn connect_options(target: &DatabaseTarget) -> Result<PgConnectOptions, sqlx::Error> {
    match target {
        DatabaseTarget::Url(url) => url.parse(),
        DatabaseTarget::Parts {
            host,
            port,
            name,
            user,
            password,
        } => Ok(PgConnectOptions::new()
            .host(host)
            .port(*port)
            .database(name)
            .username(user)
            .password(password)),
    }
}
