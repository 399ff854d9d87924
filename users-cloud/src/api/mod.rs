//! API routes for users-cloud

pub mod docs;
pub mod health;
pub mod users;

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::get;
use http::HeaderName;
use shared::middleware::{REQUEST_ID_HEADER, XRequestId, logging_middleware, route_not_found};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health_check))
        .route("/api-docs", get(docs::swagger_ui))
        .route("/api-docs.json", get(docs::openapi_spec))
        .nest("/users", users::router())
        .fallback(route_not_found)
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
