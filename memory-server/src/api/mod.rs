//! HTTP API
//!
//! - `/` and `/health`: service information
//! - `/usuarios/...`: account CRUD, authentication and permission lookup

pub mod accounts;
pub mod health;

use axum::Router;
use axum::middleware as axum_middleware;
use http::HeaderName;
use shared::middleware::{REQUEST_ID_HEADER, XRequestId, logging_middleware, route_not_found};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(accounts::router())
        .fallback(route_not_found)
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Request logging
        .layer(axum_middleware::from_fn(logging_middleware))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - outermost so every inner layer sees it
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state.clone())
}
