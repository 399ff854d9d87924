//! Account API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub use handler::{AccountCreate, AccountUpdate, Credentials};

/// Account router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/usuarios", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/tipo/{role}", get(handler::list_by_role))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/autenticar", post(handler::authenticate))
        .route("/{id}/permissoes", get(handler::permissions))
}
