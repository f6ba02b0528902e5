//! # workforce-api
//!
//! HTTP API layer for Workforce built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, request logging, admin
//! guard), extractors, DTOs, and the mapping from [`AppError`] to HTTP
//! responses.
//!
//! [`AppError`]: workforce_core::error::AppError

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use state::AppState;
