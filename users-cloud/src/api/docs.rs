//! OpenAPI document and Swagger UI page

use axum::{Json, extract::State, response::Html};
use serde_json::{Value, json};

use crate::state::AppState;

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>API Docs - CRUD Usuários</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
    <style>
        body { margin: 0; background: #fafafa; }
        .swagger-ui .topbar { display: none }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: '/api-docs.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
"#;

pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

pub async fn openapi_spec(State(state): State<AppState>) -> Json<Value> {
    Json(openapi_document(&state.config.public_url))
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Error" } }
        }
    })
}

fn user_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" },
                        "message": { "type": "string" },
                        "data": { "$ref": "#/components/schemas/User" }
                    }
                }
            }
        }
    })
}

fn list_response() -> Value {
    json!({
        "description": "Lista de usuários",
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" },
                        "count": { "type": "integer" },
                        "data": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/User" }
                        }
                    }
                }
            }
        }
    })
}

fn id_param() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "ID do usuário",
        "schema": { "type": "integer" }
    })
}

fn user_input() -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/UserInput" } }
        }
    })
}

fn collection_operations() -> Value {
    let get = json!({
        "summary": "Lista todos os usuários",
        "tags": ["Users"],
        "responses": {
            "200": list_response(),
            "500": error_response("Erro ao buscar usuários")
        }
    });
    let post = json!({
        "summary": "Cria um novo usuário",
        "tags": ["Users"],
        "requestBody": user_input(),
        "responses": {
            "201": user_response("Usuário criado com sucesso"),
            "400": error_response("Dados inválidos"),
            "409": error_response("Email já cadastrado"),
            "500": error_response("Erro ao criar usuário")
        }
    });
    json!({ "get": get, "post": post })
}

fn item_operations() -> Value {
    let get = json!({
        "summary": "Busca um usuário por ID",
        "tags": ["Users"],
        "parameters": [id_param()],
        "responses": {
            "200": user_response("Usuário encontrado"),
            "400": error_response("ID inválido"),
            "404": error_response("Usuário não encontrado"),
            "500": error_response("Erro ao buscar usuário")
        }
    });
    let put = json!({
        "summary": "Atualiza um usuário existente",
        "tags": ["Users"],
        "parameters": [id_param()],
        "requestBody": user_input(),
        "responses": {
            "200": user_response("Usuário atualizado com sucesso"),
            "400": error_response("Dados inválidos"),
            "404": error_response("Usuário não encontrado"),
            "409": error_response("Email já cadastrado para outro usuário"),
            "500": error_response("Erro ao atualizar usuário")
        }
    });
    let delete = json!({
        "summary": "Remove um usuário",
        "tags": ["Users"],
        "parameters": [id_param()],
        "responses": {
            "200": user_response("Usuário deletado com sucesso"),
            "404": error_response("Usuário não encontrado"),
            "500": error_response("Erro ao deletar usuário")
        }
    });
    json!({ "get": get, "put": put, "delete": delete })
}

fn schemas() -> Value {
    let user = json!({
        "type": "object",
        "required": ["name", "email"],
        "properties": {
            "id": { "type": "integer", "description": "ID auto-gerado do usuário" },
            "name": { "type": "string", "description": "Nome do usuário" },
            "email": { "type": "string", "description": "Email do usuário (único)" },
            "age": { "type": "integer", "nullable": true, "description": "Idade do usuário" },
            "created_at": { "type": "string", "format": "date-time" },
            "updated_at": { "type": "string", "format": "date-time" }
        },
        "example": {
            "id": 1,
            "name": "João Silva",
            "email": "joao@example.com",
            "age": 30,
            "created_at": "2024-01-01T10:00:00",
            "updated_at": "2024-01-01T10:00:00"
        }
    });
    let user_input = json!({
        "type": "object",
        "required": ["name", "email"],
        "properties": {
            "name": { "type": "string" },
            "email": { "type": "string" },
            "age": { "type": "integer", "minimum": 0, "maximum": 150 }
        },
        "example": { "name": "Maria Santos", "email": "maria@example.com", "age": 25 }
    });
    let error = json!({
        "type": "object",
        "properties": {
            "success": { "type": "boolean" },
            "message": { "type": "string" },
            "error": { "type": "string" }
        }
    });
    json!({ "User": user, "UserInput": user_input, "Error": error })
}

/// OpenAPI 3.0 description of the `/users` resource
pub fn openapi_document(server_url: &str) -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "API de Usuários - CRUD Completo",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "API REST para gerenciamento de usuários com PostgreSQL",
        },
        "servers": [
            { "url": server_url, "description": "Servidor atual" }
        ],
        "tags": [
            { "name": "Users", "description": "Operações relacionadas a usuários" }
        ],
        "paths": {
            "/users": collection_operations(),
            "/users/{id}": item_operations()
        },
        "components": { "schemas": schemas() }
    })
}
