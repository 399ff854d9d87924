//! User CRUD handlers
//!
//! Validation order on create and update: required fields, email format,
//! email uniqueness, age range.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::extract::JsonBody;
use shared::models::{NewUser, UserPayload, UserRecord};
use shared::validation::{
    MSG_EMAIL_TAKEN, MSG_EMAIL_TAKEN_BY_OTHER, parse_id, validate_age, validate_contact,
};

use crate::state::AppState;

const MSG_LIST_FAILED: &str = "Erro ao buscar usuários";
const MSG_GET_FAILED: &str = "Erro ao buscar usuário";
const MSG_CREATE_FAILED: &str = "Erro ao criar usuário";
const MSG_UPDATE_FAILED: &str = "Erro ao atualizar usuário";
const MSG_DELETE_FAILED: &str = "Erro ao deletar usuário";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
}

fn not_found(id: i32) -> AppError {
    AppError::user_not_found(format!("Usuário com ID {id} não encontrado"))
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<UserRecord>>>> {
    let users = state
        .users
        .find_all()
        .await
        .map_err(|e| e.context(MSG_LIST_FAILED))?;
    Ok(Json(ApiResponse::list(users)))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<UserRecord>>> {
    let id = parse_id::<i32>(&id)?;
    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| e.context(MSG_GET_FAILED))?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserRecord>>)> {
    let (name, email) = validate_contact(payload.name.as_deref(), payload.email.as_deref())?;

    let existing = state
        .users
        .find_by_email(email)
        .await
        .map_err(|e| e.context(MSG_CREATE_FAILED))?;
    if existing.is_some() {
        return Err(AppError::email_conflict(MSG_EMAIL_TAKEN));
    }

    let age = validate_age(payload.age.flatten())?;

    let new_user = NewUser {
        name: name.to_string(),
        email: email.to_string(),
        age,
    };
    let created = state
        .users
        .create(&new_user)
        .await
        .map_err(|e| e.context(MSG_CREATE_FAILED))?;
    tracing::info!(id = created.id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Usuário criado com sucesso",
            created,
        )),
    ))
}

/// Overwrite name and email; an absent age keeps the stored one, `null`
/// clears it
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> AppResult<Json<ApiResponse<UserRecord>>> {
    let id = parse_id::<i32>(&id)?;
    let current = state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| e.context(MSG_UPDATE_FAILED))?
        .ok_or_else(|| not_found(id))?;

    let (name, email) = validate_contact(payload.name.as_deref(), payload.email.as_deref())?;

    let owner = state
        .users
        .find_by_email(email)
        .await
        .map_err(|e| e.context(MSG_UPDATE_FAILED))?;
    if owner.is_some_and(|other| other.id != id) {
        return Err(AppError::email_conflict(MSG_EMAIL_TAKEN_BY_OTHER));
    }

    let age = match payload.age {
        Some(age) => validate_age(age)?,
        None => current.age,
    };

    let changes = NewUser {
        name: name.to_string(),
        email: email.to_string(),
        age,
    };
    let updated = state
        .users
        .update(id, &changes)
        .await
        .map_err(|e| e.context(MSG_UPDATE_FAILED))?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "User updated");

    Ok(Json(ApiResponse::success_with_message(
        "Usuário atualizado com sucesso",
        updated,
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<UserRecord>>> {
    let id = parse_id::<i32>(&id)?;
    let deleted = state
        .users
        .delete(id)
        .await
        .map_err(|e| e.context(MSG_DELETE_FAILED))?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "User deleted");

    Ok(Json(ApiResponse::success_with_message(
        "Usuário deletado com sucesso",
        deleted,
    )))
}
