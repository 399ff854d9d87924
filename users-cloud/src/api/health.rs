//! Service index and health check

use axum::{Json, extract::State, http::StatusCode};

use crate::state::AppState;

pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "API de Usuários - CRUD Completo",
        "version": env!("CARGO_PKG_VERSION"),
        "documentation": "/api-docs",
        "endpoints": {
            "users": {
                "GET /users": "Listar todos os usuários",
                "GET /users/{id}": "Buscar usuário por ID",
                "POST /users": "Criar novo usuário",
                "PUT /users/{id}": "Atualizar usuário",
                "DELETE /users/{id}": "Deletar usuário",
            },
        },
        "database": "PostgreSQL",
        "status": "online",
    }))
}

/// 200 while the database answers, 503 otherwise
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let (status, database) = match state.users.ping().await {
        Ok(()) => (StatusCode::OK, "up"),
        Err(e) => {
            tracing::warn!(error = ?e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "down")
        }
    };

    (
        status,
        Json(serde_json::json!({
            "status": if status.is_success() { "ok" } else { "degraded" },
            "service": "users-cloud",
            "version": env!("CARGO_PKG_VERSION"),
            "environment": state.config.environment,
            "database": database,
        })),
    )
}
