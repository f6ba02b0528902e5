//! Leave request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use workforce_core::types::LeaveId;

use crate::dto::request::{CreateLeaveRequest, LeaveFilterParams};
use crate::dto::response::{ApiResponse, LeaveDetailResponse, LeaveResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiQuery, AuthUser, IdPath, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/leave/add
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateLeaveRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<LeaveResponse>>)> {
    let leave = state.leave_service.create(&auth, req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            leave.into(),
            "Leave request submitted",
        )),
    ))
}

/// GET /api/leave/{id}
///
/// `id` is an employee profile id or account id. Employees always get their own.
pub async fn list_for_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ApiQuery(filters): ApiQuery<LeaveFilterParams>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> ApiResult<Json<ApiResponse<Vec<LeaveResponse>>>> {
    let page = state
        .leave_service
        .list(&auth, id, &filters.into(), &pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::paginated(page.map(LeaveResponse::from))))
}

/// GET /api/leave
pub async fn list_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<LeaveDetailResponse>>>> {
    let leaves = state.leave_service.list_all(&auth).await?;
    Ok(Json(ApiResponse::ok(
        leaves.into_iter().map(LeaveDetailResponse::from).collect(),
    )))
}

/// GET /api/leave/detail/{id}
pub async fn detail(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<LeaveDetailResponse>>> {
    let view = state
        .leave_service
        .detail(&auth, LeaveId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::ok(view.into())))
}

/// PUT /api/leave/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<LeaveResponse>>> {
    let leave = state
        .leave_service
        .approve(&auth, LeaveId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::with_message(
        leave.into(),
        "Leave request approved",
    )))
}

/// PUT /api/leave/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<LeaveResponse>>> {
    let leave = state
        .leave_service
        .reject(&auth, LeaveId::from_uuid(id))
        .await?;
    Ok(Json(ApiResponse::with_message(
        leave.into(),
        "Leave request rejected",
    )))
}
