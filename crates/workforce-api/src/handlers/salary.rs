//! Salary handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use workforce_entity::salary::{SalaryRecord, SalaryView};

use crate::dto::request::CreateSalaryRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::state::AppState;

/// POST /api/salary/add
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateSalaryRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SalaryRecord>>)> {
    let record = state.salary_service.add(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// GET /api/salary/{id}
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<Vec<SalaryView>>>> {
    let history = state.salary_service.list(&auth, id).await?;
    Ok(Json(ApiResponse::ok(history)))
}
