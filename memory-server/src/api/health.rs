//! Service index and health check

use axum::{Json, Router, extract::State, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}

/// Endpoint listing
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "API CRUD com Herança - Funcionando!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /usuarios": "Listar todos os usuários",
            "GET /usuarios/{id}": "Buscar usuário por ID",
            "POST /usuarios": "Criar novo usuário",
            "PUT /usuarios/{id}": "Atualizar usuário",
            "DELETE /usuarios/{id}": "Deletar usuário",
            "POST /usuarios/{id}/autenticar": "Autenticar usuário",
            "GET /usuarios/{id}/permissoes": "Verificar permissões (administradores)",
            "GET /usuarios/tipo/{tipo}": "Buscar usuários por tipo",
        },
    }))
}

pub async fn health_check(State(state): State<ServerState>) -> Json<serde_json::Value> {
    let accounts = state.store.read().len();
    Json(serde_json::json!({
        "status": "ok",
        "service": "memory-server",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "accounts": accounts,
    }))
}
