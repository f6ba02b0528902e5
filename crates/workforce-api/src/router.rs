//! Route definitions for the Workforce HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router without the outer middleware stack.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(leave_routes())
        .merge(department_routes())
        .merge(employee_routes())
        .merge(salary_routes())
        .merge(setting_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Auth endpoints: login, verify, refresh
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/verify", post(handlers::auth::verify))
        .route("/auth/refresh", post(handlers::auth::refresh))
}

/// Leave request lifecycle
fn leave_routes() -> Router<AppState> {
    Router::new()
        .route("/leave", get(handlers::leave::list_all))
        .route("/leave/add", post(handlers::leave::create))
        .route("/leave/detail/{id}", get(handlers::leave::detail))
        .route("/leave/{id}", get(handlers::leave::list_for_employee))
        .route("/leave/{id}/approve", put(handlers::leave::approve))
        .route("/leave/{id}/reject", put(handlers::leave::reject))
}

/// Department administration
fn department_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/department",
            get(handlers::department::list).post(handlers::department::create),
        )
        .route("/department/add", post(handlers::department::create))
        .route(
            "/department/{id}",
            get(handlers::department::get)
                .put(handlers::department::update)
                .delete(handlers::department::delete),
        )
}

/// Employee directory
fn employee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/employee",
            get(handlers::employee::list).post(handlers::employee::create),
        )
        .route("/employee/add", post(handlers::employee::create))
        .route(
            "/employee/department/{id}",
            get(handlers::employee::list_by_department),
        )
        .route(
            "/employee/{id}",
            get(handlers::employee::get)
                .put(handlers::employee::update)
                .delete(handlers::employee::delete),
        )
}

/// Salary records
fn salary_routes() -> Router<AppState> {
    Router::new()
        .route("/salary/add", post(handlers::salary::create))
        .route("/salary/{id}", get(handlers::salary::list))
}

/// Self-service settings
fn setting_routes() -> Router<AppState> {
    Router::new().route(
        "/setting/change-password",
        put(handlers::setting::change_password),
    )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
