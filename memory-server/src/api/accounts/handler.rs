//! Account API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::extract::JsonBody;
use shared::models::{ADMIN_ROLE, Account, AccountView, Administrator, Person, Profile, User};
use shared::validation::{
    MSG_EMAIL_TAKEN, MSG_EMAIL_TAKEN_BY_OTHER, MSG_NAME_EMAIL_REQUIRED, parse_id,
    validate_contact, validate_email_format,
};

use crate::core::ServerState;
use crate::store::{AccountChanges, StoreError};

const MSG_INVALID_ACCOUNT: &str = "Dados inválidos. Nome, email e senha são obrigatórios.";

/// Create account payload (accepts the Portuguese field names too)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountCreate {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "senha")]
    pub password: Option<String>,
    #[serde(default, alias = "tipo")]
    pub role: Option<String>,
    #[serde(default, alias = "nivel")]
    pub level: Option<i32>,
}

/// Partial update payload; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "senha")]
    pub password: Option<String>,
    #[serde(default, alias = "ativo")]
    pub active: Option<bool>,
}

impl From<AccountUpdate> for AccountChanges {
    fn from(update: AccountUpdate) -> Self {
        Self {
            name: update.name,
            email: update.email,
            password: update.password,
            active: update.active,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, alias = "senha")]
    pub password: Option<String>,
}

/// Profile returned after a successful authentication
#[derive(Debug, Serialize)]
pub struct AuthenticatedProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct PermissionsView {
    pub name: String,
    pub level: i32,
    pub permissions: &'static [&'static str],
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => not_found(id),
        }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::user_not_found("Usuário não encontrado").with_detail("id", id)
}

/// List all accounts
pub async fn list(State(state): State<ServerState>) -> Json<ApiResponse<Vec<AccountView>>> {
    let store = state.store.read();
    let accounts = store.list().iter().map(AccountView::from).collect();
    Json(ApiResponse::list(accounts))
}

/// List accounts carrying the given role
pub async fn list_by_role(
    State(state): State<ServerState>,
    Path(role): Path<String>,
) -> Json<ApiResponse<Vec<AccountView>>> {
    let store = state.store.read();
    let accounts = store
        .find_by_role(&role)
        .into_iter()
        .map(AccountView::from)
        .collect();
    Json(ApiResponse::list(accounts))
}

/// Get account by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<AccountView>>> {
    let id = parse_id::<i64>(&id)?;
    let store = state.store.read();
    let account = store.find_by_id(id).ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(AccountView::from(account))))
}

/// Create a user, or an administrator when `role == "admin"`
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<AccountCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<AccountView>>)> {
    let (name, email) = validate_contact(payload.name.as_deref(), payload.email.as_deref())?;
    let password = payload.password.clone().unwrap_or_default();

    // Uniqueness check and insert happen under one write lock
    let mut store = state.store.write();

    let person = Person::new(store.next_id(), name, email);
    let account: Account = match payload.role.as_deref() {
        Some(ADMIN_ROLE) => Administrator::new(person, password, payload.level).into(),
        _ => User::new(person, password, payload.role.clone()).into(),
    };

    if !account.validate() {
        return Err(AppError::validation(MSG_INVALID_ACCOUNT));
    }
    if store.find_by_email(email).is_some() {
        return Err(AppError::email_conflict(MSG_EMAIL_TAKEN));
    }

    let created = store.insert(account);
    tracing::info!(
        id = created.id(),
        kind = created.kind().as_str(),
        "Account created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Usuário criado com sucesso!",
            AccountView::from(created),
        )),
    ))
}

/// Overwrite only the supplied fields of an account
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<AccountUpdate>,
) -> AppResult<Json<ApiResponse<AccountView>>> {
    let id = parse_id::<i64>(&id)?;
    let changes = AccountChanges::from(payload);

    let mut store = state.store.write();
    let existing = store.find_by_id(id).ok_or_else(|| not_found(id))?;

    if changes.name.as_deref() == Some("") || changes.email.as_deref() == Some("") {
        return Err(AppError::validation(MSG_NAME_EMAIL_REQUIRED));
    }

    let mut candidate = existing.clone();
    changes.apply(&mut candidate);
    if !candidate.validate() {
        return Err(AppError::validation(MSG_INVALID_ACCOUNT));
    }

    if let Some(email) = changes.email.as_deref() {
        validate_email_format(email)?;
        if store.find_by_email(email).is_some_and(|other| other.id() != id) {
            return Err(AppError::email_conflict(MSG_EMAIL_TAKEN_BY_OTHER));
        }
    }

    let updated = store.update_fields(id, &changes)?;
    tracing::info!(id, "Account updated");

    Ok(Json(ApiResponse::success_with_message(
        "Usuário atualizado com sucesso!",
        AccountView::from(updated),
    )))
}

/// Remove an account; its id is never handed out again
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<AccountView>>> {
    let id = parse_id::<i64>(&id)?;
    let removed = state.store.write().remove(id)?;
    tracing::info!(id, "Account deleted");

    Ok(Json(ApiResponse::success_with_message(
        "Usuário deletado com sucesso!",
        AccountView::from(&removed),
    )))
}

/// Check a password against the stored one
pub async fn authenticate(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> AppResult<Json<ApiResponse<AuthenticatedProfile>>> {
    let id = parse_id::<i64>(&id)?;
    let store = state.store.read();
    let account = store.find_by_id(id).ok_or_else(|| not_found(id))?;

    let candidate = credentials.password.unwrap_or_default();
    if !account.authenticate(&candidate) {
        tracing::warn!(id, "Authentication failed");
        return Err(AppError::invalid_credentials());
    }

    let person = account.person();
    Ok(Json(ApiResponse::success_with_message(
        "Autenticação bem-sucedida!",
        AuthenticatedProfile {
            id: person.id,
            name: person.name.clone(),
            email: person.email.clone(),
            role: account.role().to_string(),
        },
    )))
}

/// Permission set of an administrator; 403 for any other account
pub async fn permissions(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<PermissionsView>>> {
    let id = parse_id::<i64>(&id)?;
    let store = state.store.read();
    let account = store.find_by_id(id).ok_or_else(|| not_found(id))?;

    match (account.permissions(), account.level()) {
        (Some(permissions), Some(level)) => Ok(Json(ApiResponse::success(PermissionsView {
            name: account.person().name.clone(),
            level,
            permissions,
        }))),
        _ => Err(AppError::admin_required().with_detail("kind", account.kind().as_str())),
    }
}
