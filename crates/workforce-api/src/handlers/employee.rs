//! Employee directory handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use workforce_core::types::DepartmentId;
use workforce_entity::employee::EmployeeView;

use crate::dto::request::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::state::AppState;

/// POST /api/employee
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<EmployeeView>>)> {
    let employee = state
        .employee_directory
        .add_employee(&auth, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(employee))))
}

/// GET /api/employee
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<EmployeeView>>>> {
    let employees = state.employee_directory.list_employees(&auth).await?;
    Ok(Json(ApiResponse::ok(employees)))
}

/// GET /api/employee/{id}
///
/// Employees may fetch only their own profile.
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<EmployeeView>>> {
    let employee = state.employee_directory.get_employee(&auth, id).await?;
    Ok(Json(ApiResponse::ok(employee)))
}

/// PUT /api/employee/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<UpdateEmployeeRequest>,
) -> ApiResult<Json<ApiResponse<EmployeeView>>> {
    let employee = state
        .employee_directory
        .update_employee(&auth, id, req.into_update()?)
        .await?;
    Ok(Json(ApiResponse::ok(employee)))
}

/// DELETE /api/employee/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.employee_directory.delete_employee(&auth, id).await?;
    Ok(Json(ApiResponse::message("Employee deleted")))
}

/// GET /api/employee/department/{id}
pub async fn list_by_department(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<Vec<EmployeeView>>>> {
    let employees = state
        .employee_directory
        .list_by_department(&auth, DepartmentId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(employees)))
}
