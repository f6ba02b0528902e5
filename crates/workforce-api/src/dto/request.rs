//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use workforce_core::types::{AccountId, DepartmentId};
use workforce_entity::account::Role;
use workforce_entity::department::DepartmentInput;
use workforce_entity::employee::EmployeeUpdate;
use workforce_service::{LeaveQuery, NewEmployee, NewLeave, NewSalary};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Leave filing body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    /// Owner account; admins only.
    pub user_id: Option<Uuid>,
    /// `Sick Leave`, `Casual Leave`, or `Annual Leave`.
    pub leave_type: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Justification.
    #[validate(length(min = 1, max = 2000, message = "Reason is required"))]
    pub reason: String,
}

impl From<CreateLeaveRequest> for NewLeave {
    fn from(req: CreateLeaveRequest) -> Self {
        Self {
            user_id: req.user_id.map(AccountId::from_uuid),
            leave_type: req.leave_type,
            start_date: req.start_date,
            end_date: req.end_date,
            reason: req.reason,
        }
    }
}

/// Leave listing filters (`?status=&leaveType=`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveFilterParams {
    /// `Pending`, `Approved`, or `Rejected`.
    pub status: Option<String>,
    /// Leave type label.
    pub leave_type: Option<String>,
}

impl From<LeaveFilterParams> for LeaveQuery {
    fn from(params: LeaveFilterParams) -> Self {
        Self {
            status: params.status,
            leave_type: params.leave_type,
        }
    }
}

/// Department create/update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepartmentRequest {
    /// Unique name.
    #[validate(length(min = 1, max = 100, message = "Department name is required"))]
    pub name: String,
    /// Free text.
    pub description: Option<String>,
}

impl From<DepartmentRequest> for DepartmentInput {
    fn from(req: DepartmentRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

/// Employee onboarding body (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// `admin` or `employee`.
    pub role: Option<String>,
    /// Business key.
    #[validate(length(min = 1, max = 50))]
    pub employee_code: String,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Gender.
    pub gender: Option<String>,
    /// Marital status.
    pub marital_status: Option<String>,
    /// Job title.
    #[validate(length(min = 1, max = 200))]
    pub designation: String,
    /// Department.
    pub department_id: Option<Uuid>,
    /// Base salary.
    pub salary: f64,
    /// Profile image reference.
    pub profile_image: Option<String>,
}

impl From<CreateEmployeeRequest> for NewEmployee {
    fn from(req: CreateEmployeeRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            employee_code: req.employee_code,
            date_of_birth: req.date_of_birth,
            gender: req.gender,
            marital_status: req.marital_status,
            designation: req.designation,
            department_id: req.department_id.map(DepartmentId::from_uuid),
            salary: req.salary,
            profile_image: req.profile_image,
        }
    }
}

/// Partial employee update body (admin).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    /// Display name.
    pub name: Option<String>,
    /// `admin` or `employee`.
    pub role: Option<String>,
    /// Marital status.
    pub marital_status: Option<String>,
    /// Job title.
    pub designation: Option<String>,
    /// Department.
    pub department_id: Option<Uuid>,
    /// Base salary.
    pub salary: Option<f64>,
}

impl UpdateEmployeeRequest {
    /// Parses labels into a typed update.
    pub fn into_update(self) -> Result<EmployeeUpdate, workforce_core::error::AppError> {
        Ok(EmployeeUpdate {
            name: self.name,
            role: self.role.as_deref().map(str::parse::<Role>).transpose()?,
            marital_status: self.marital_status,
            designation: self.designation,
            department_id: self.department_id.map(DepartmentId::from_uuid),
            salary: self.salary,
        })
    }
}

/// Salary payment body (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalaryRequest {
    /// Profile or account key.
    pub employee_id: Uuid,
    /// Base amount.
    pub basic_salary: f64,
    /// Additions.
    #[serde(default)]
    pub allowances: f64,
    /// Withholdings.
    #[serde(default)]
    pub deductions: f64,
    /// Payment date.
    pub pay_date: NaiveDate,
}

impl From<CreateSalaryRequest> for NewSalary {
    fn from(req: CreateSalaryRequest) -> Self {
        Self {
            employee_id: req.employee_id,
            basic_salary: req.basic_salary,
            allowances: req.allowances,
            deductions: req.deductions,
            pay_date: req.pay_date,
        }
    }
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub old_password: String,
    /// New password.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_body_uses_camel_case() {
        let body = serde_json::json!({
            "userId": null,
            "leaveType": "Annual Leave",
            "startDate": "2024-01-10",
            "endDate": "2024-01-12",
            "reason": "trip"
        });
        let req: CreateLeaveRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_ok());
        let leave = NewLeave::from(req);
        assert_eq!(leave.leave_type, "Annual Leave");
        assert!(leave.user_id.is_none());
    }

    #[test]
    fn test_blank_reason_fails_validation() {
        let body = serde_json::json!({
            "leaveType": "Sick Leave",
            "startDate": "2024-01-10",
            "endDate": "2024-01-10",
            "reason": ""
        });
        let req: CreateLeaveRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_rejects_unknown_role() {
        let req = UpdateEmployeeRequest {
            role: Some("owner".into()),
            ..Default::default()
        };
        assert!(req.into_update().is_err());
    }
}
