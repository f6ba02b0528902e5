//! Response DTOs.

use serde::{Deserialize, Serialize};

use workforce_core::types::pagination::{PageMeta, PageResponse};
use workforce_entity::leave::{LeaveRequest, LeaveView};

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Page metadata for paginated listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: None,
        }
    }

    /// Successful response with a message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Splits a page into `data` and `pagination`.
    pub fn paginated(page: PageResponse<T>) -> Self {
        Self {
            success: true,
            data: Some(page.items),
            message: None,
            pagination: Some(page.pagination),
        }
    }
}

impl ApiResponse<()> {
    /// Success with only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            pagination: None,
        }
    }
}

/// Leave request with its inclusive length in days.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveResponse {
    /// Stored fields.
    #[serde(flatten)]
    pub leave: LeaveRequest,
    /// `end - start + 1`.
    pub duration_days: i64,
}

impl From<LeaveRequest> for LeaveResponse {
    fn from(leave: LeaveRequest) -> Self {
        let duration_days = leave.duration_days();
        Self {
            leave,
            duration_days,
        }
    }
}

/// Leave request with owner display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDetailResponse {
    /// Leave plus owner.
    #[serde(flatten)]
    pub view: LeaveView,
    /// `end - start + 1`.
    pub duration_days: i64,
}

impl From<LeaveView> for LeaveDetailResponse {
    fn from(view: LeaveView) -> Self {
        let duration_days = view.leave.duration_days();
        Self {
            view,
            duration_days,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
