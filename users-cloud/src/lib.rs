//! users-cloud: user CRUD over PostgreSQL
//!
//! - `/users` CRUD backed by a pooled `users` table
//! - OpenAPI document at `/api-docs.json`, Swagger UI at `/api-docs`

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod state;
pub mod utils;

pub use config::{Config, ConfigError};
pub use db::{PgUserRepository, UserRepository};
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
pub use utils::init_logger;
