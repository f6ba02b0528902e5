//! Auth handlers: login, verify, refresh.

use axum::Json;
use axum::extract::State;

use workforce_entity::account::AccountIdentity;
use workforce_service::LoginResult;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResult>>> {
    let result = state
        .auth_service
        .authenticate(&req.email, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/auth/verify
pub async fn verify(auth: AuthUser) -> Json<ApiResponse<AccountIdentity>> {
    Json(ApiResponse::ok(auth.identity()))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> ApiResult<Json<ApiResponse<LoginResult>>> {
    let result = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(result)))
}
