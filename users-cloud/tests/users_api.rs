//! `/users` API tests over an in-memory repository (no database required)

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use chrono::Utc;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use shared::error::AppError;
use shared::models::{NewUser, UserRecord};
use shared::validation::MSG_EMAIL_TAKEN;
use tokio::sync::Mutex;
use tower::ServiceExt;
use users_cloud::config::DatabaseTarget;
use users_cloud::{AppState, Config, ServiceError, ServiceResult, UserRepository, api};

#[derive(Default)]
struct FakeUsers {
    rows: Mutex<(Vec<UserRecord>, i32)>,
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn find_all(&self) -> ServiceResult<Vec<UserRecord>> {
        Ok(self.rows.lock().await.0.clone())
    }

    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<UserRecord>> {
        Ok(self.rows.lock().await.0.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> ServiceResult<Option<UserRecord>> {
        Ok(self
            .rows
            .lock()
            .await
            .0
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> ServiceResult<UserRecord> {
        let mut guard = self.rows.lock().await;
        let (rows, last_id) = &mut *guard;
        if rows.iter().any(|u| u.email == user.email) {
            return Err(AppError::email_conflict(MSG_EMAIL_TAKEN).into());
        }
        *last_id += 1;
        let now = Utc::now().naive_utc();
        let record = UserRecord {
            id: *last_id,
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age,
            created_at: Some(now),
            updated_at: Some(now),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i32, user: &NewUser) -> ServiceResult<Option<UserRecord>> {
        let mut guard = self.rows.lock().await;
        let Some(row) = guard.0.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        row.name = user.name.clone();
        row.email = user.email.clone();
        row.age = user.age;
        row.updated_at = Some(Utc::now().naive_utc());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> ServiceResult<Option<UserRecord>> {
        let mut guard = self.rows.lock().await;
        let index = guard.0.iter().position(|u| u.id == id);
        Ok(index.map(|i| guard.0.remove(i)))
    }

    async fn ping(&self) -> ServiceResult<()> {
        Ok(())
    }
}

/// Every call fails like a lost database connection
struct BrokenUsers;

#[async_trait]
impl UserRepository for BrokenUsers {
    async fn find_all(&self) -> ServiceResult<Vec<UserRecord>> {
        Err(ServiceError::Db("connection refused".into()))
    }

    async fn find_by_id(&self, _id: i32) -> ServiceResult<Option<UserRecord>> {
        Err(ServiceError::Db("connection refused".into()))
    }

    async fn find_by_email(&self, _email: &str) -> ServiceResult<Option<UserRecord>> {
        Err(ServiceError::Db("connection refused".into()))
    }

    async fn create(&self, _user: &NewUser) -> ServiceResult<UserRecord> {
        Err(ServiceError::Db("connection refused".into()))
    }

    async fn update(&self, _id: i32, _user: &NewUser) -> ServiceResult<Option<UserRecord>> {
        Err(ServiceError::Db("connection refused".into()))
    }

    async fn delete(&self, _id: i32) -> ServiceResult<Option<UserRecord>> {
        Err(ServiceError::Db("connection refused".into()))
    }

    async fn ping(&self) -> ServiceResult<()> {
        Err(ServiceError::Db("connection refused".into()))
    }
}

fn test_config() -> Config {
    Config {
        database: DatabaseTarget::Url("postgres://localhost/unused".into()),
        http_port: 3000,
        environment: "test".into(),
        max_connections: 1,
        acquire_timeout: std::time::Duration::from_secs(1),
        idle_timeout: std::time::Duration::from_secs(1),
        public_url: "http://localhost:3000".into(),
    }
}

fn app_with(users: Arc<dyn UserRepository>) -> Router {
    api::build_app(AppState::with_repository(test_config(), users))
}

fn app() -> Router {
    app_with(Arc::new(FakeUsers::default()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, "POST", "/users", Some(body)).await
}

#[tokio::test]
async fn test_create_then_get() {
    let app = app();
    let (status, body) = create(&app, json!({"name": "Ana", "email": "ana@x.com", "age": 30})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Usuário criado com sucesso");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ana");
    assert_eq!(body["data"]["email"], "ana@x.com");
    assert_eq!(body["data"]["age"], 30);
}

#[tokio::test]
async fn test_list_counts_users_in_id_order() {
    let app = app();
    create(&app, json!({"name": "Ana", "email": "ana@x.com"})).await;
    create(&app, json!({"name": "Bia", "email": "bia@x.com"})).await;

    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["name"], "Ana");
    assert_eq!(body["data"][1]["name"], "Bia");
    assert_eq!(body["data"][0]["age"], Value::Null);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = app();
    let (status, _) = create(&app, json!({"name": "Ana", "email": "ana@x.com"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = create(&app, json!({"name": "Outra", "email": "ana@x.com"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email já cadastrado");
}

#[tokio::test]
async fn test_create_validation() {
    let app = app();

    let (status, body) = create(&app, json!({"name": "Ana", "email": "ana@x.com", "age": 200})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Idade deve estar entre 0 e 150");

    let (status, body) = create(&app, json!({"name": "Ana"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Nome e email são obrigatórios");

    let (status, body) = create(&app, json!({"name": "Ana", "email": "ana@x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email inválido");

    let (status, _) = create(&app, json!({"name": "Ana", "email": "ana@x.com", "age": "old"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_update_with_email_of_another_user_conflicts() {
    let app = app();
    create(&app, json!({"name": "Ana", "email": "ana@x.com"})).await;
    create(&app, json!({"name": "Bia", "email": "bia@x.com"})).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/users/1",
        Some(json!({"name": "Ana", "email": "bia@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email já cadastrado para outro usuário");
}

#[tokio::test]
async fn test_update_keeps_age_when_absent() {
    let app = app();
    create(&app, json!({"name": "Ana", "email": "ana@x.com", "age": 41})).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/users/1",
        Some(json!({"name": "Ana Maria", "email": "ana@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Usuário atualizado com sucesso");
    assert_eq!(body["data"]["name"], "Ana Maria");
    assert_eq!(body["data"]["age"], 41);

    let (_, body) = send(
        &app,
        "PUT",
        "/users/1",
        Some(json!({"name": "Ana Maria", "email": "ana@x.com", "age": 42})),
    )
    .await;
    assert_eq!(body["data"]["age"], 42);
}

#[tokio::test]
async fn test_update_with_null_age_clears_it() {
    let app = app();
    create(&app, json!({"name": "Ana", "email": "ana@x.com", "age": 41})).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/users/1",
        Some(json!({"name": "Ana", "email": "ana@x.com", "age": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["age"], Value::Null);

    let (_, body) = send(&app, "GET", "/users/1", None).await;
    assert_eq!(body["data"]["age"], Value::Null);
}

#[tokio::test]
async fn test_update_validation() {
    let app = app();
    create(&app, json!({"name": "Ana", "email": "ana@x.com", "age": 41})).await;

    let (status, body) = send(&app, "PUT", "/users/1", Some(json!({"email": "ana@x.com"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Nome e email são obrigatórios");

    let (status, body) = send(
        &app,
        "PUT",
        "/users/1",
        Some(json!({"name": "Ana", "email": "ana.x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email inválido");

    for age in [json!(-1), json!(151), json!(3_000_000_000_i64)] {
        let (status, body) = send(
            &app,
            "PUT",
            "/users/1",
            Some(json!({"name": "Ana", "email": "ana@x.com", "age": age})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Idade deve estar entre 0 e 150");
    }

    // Nothing was written
    let (_, body) = send(&app, "GET", "/users/1", None).await;
    assert_eq!(body["data"]["name"], "Ana");
    assert_eq!(body["data"]["age"], 41);
}

#[tokio::test]
async fn test_create_age_beyond_integer_range() {
    let app = app();
    let (status, body) = create(
        &app,
        json!({"name": "Ana", "email": "ana@x.com", "age": 3_000_000_000_i64}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Idade deve estar entre 0 e 150");
}

#[tokio::test]
async fn test_update_unknown_user_is_checked_first() {
    let app = app();
    let (status, body) = send(&app, "PUT", "/users/9", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Usuário com ID 9 não encontrado");
}

#[tokio::test]
async fn test_delete_then_get_not_found() {
    let app = app();
    create(&app, json!({"name": "Ana", "email": "ana@x.com"})).await;

    let (status, body) = send(&app, "DELETE", "/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Usuário deletado com sucesso");
    assert_eq!(body["data"]["email"], "ana@x.com");

    let (status, _) = send(&app, "GET", "/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_id_and_unknown_route() {
    let app = app();

    let (status, body) = send(&app, "GET", "/users/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "ID inválido");

    let (status, body) = send(&app, "GET", "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Rota não encontrada");
    assert_eq!(body["path"], "/nowhere");
}

#[tokio::test]
async fn test_database_failure_is_500_with_context() {
    let app = app_with(Arc::new(BrokenUsers));

    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Erro ao buscar usuários");
    assert_eq!(body["error"], "connection refused");

    let (status, body) = create(&app, json!({"name": "Ana", "email": "ana@x.com"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Erro ao criar usuário");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn test_docs_and_index() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api-docs.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["openapi"], "3.0.3");
    assert_eq!(body["servers"][0]["url"], "http://localhost:3000");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api-docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&html).contains("/api-docs.json"));

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["documentation"], "/api-docs");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
