//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use workforce_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::MissingCredentials
        | ErrorKind::InvalidCredentials
        | ErrorKind::InvalidToken
        | ErrorKind::UnknownAccount => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Converts an [`AppError`] into the JSON error envelope.
///
/// Server faults are logged with their cause and replaced by a generic
/// message; client errors keep their message.
pub fn into_response(err: AppError) -> Response {
    let status = status_for(err.kind);
    let message = if err.kind.is_server_fault() {
        tracing::error!(
            kind = %err.kind,
            error = %err.message,
            source = ?err.source,
            "Internal server error"
        );
        "An internal error occurred".to_string()
    } else {
        err.message
    };

    let body = ApiErrorResponse {
        success: false,
        error: err.kind.code().to_string(),
        message,
    };
    (status, Json(body)).into_response()
}

/// Handler-facing wrapper around [`AppError`].
///
/// Both `AppError` and `IntoResponse` live in other crates, so handlers
/// return this and convert with `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        into_response(self.0)
    }
}

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::UnknownAccount), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorKind::Database),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_fault_message_is_hidden() {
        let response = ApiError(AppError::database("relation \"x\" does not exist")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
