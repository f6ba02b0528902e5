//! Department handlers (admin).

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use workforce_core::types::DepartmentId;
use workforce_entity::department::Department;

use crate::dto::request::DepartmentRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::state::AppState;

/// POST /api/department
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<DepartmentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Department>>)> {
    let department = state.department_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(department))))
}

/// GET /api/department
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Department>>>> {
    let departments = state.department_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(departments)))
}

/// GET /api/department/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<Department>>> {
    let department = state
        .department_service
        .get(&auth, DepartmentId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(department)))
}

/// PUT /api/department/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<DepartmentRequest>,
) -> ApiResult<Json<ApiResponse<Department>>> {
    let department = state
        .department_service
        .update(&auth, DepartmentId::from_uuid(id), req.into())
        .await?;
    Ok(Json(ApiResponse::ok(department)))
}

/// DELETE /api/department/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<()>>> {
    state
        .department_service
        .delete(&auth, DepartmentId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::message("Department deleted")))
}
