//! Account settings handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::ChangePasswordRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// PUT /api/setting/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state
        .setting_service
        .change_password(&auth, &req.old_password, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::message("Password changed")))
}
