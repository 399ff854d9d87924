//! Shared types for the user services
//!
//! Entity hierarchy, persisted user model, error types, response envelope,
//! input validation and HTTP middleware used by `memory-server` and
//! `users-cloud`.

pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod validation;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
