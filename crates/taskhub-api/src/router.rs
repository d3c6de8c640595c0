//! Route definitions for the TaskHub HTTP API.
//!
//! Paths are served at the root with no `/api` prefix. The router
//! receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(auth_routes())
        .merge(task_routes())
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh-token", post(handlers::auth::refresh))
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::me))
}

/// Task CRUD endpoints (bearer-protected via the `AuthUser` extractor)
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(handlers::task::list_tasks))
        .route("/tasks", post(handlers::task::create_task))
        .route("/tasks/{id}", get(handlers::task::get_task))
        .route("/tasks/{id}", patch(handlers::task::update_task))
        .route("/tasks/{id}", delete(handlers::task::delete_task))
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
