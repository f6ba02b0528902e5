//! Employee profile entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use workforce_core::types::{AccountId, DepartmentId, EmployeeId};

use crate::account::{CreateAccount, Role};

/// The workplace record tied 1:1 to an account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    /// Storage key.
    pub id: EmployeeId,
    /// Owning account.
    pub account_id: AccountId,
    /// Business key shown to humans, e.g. `EMP-0042`.
    pub employee_code: String,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Gender as entered.
    pub gender: Option<String>,
    /// Marital status as entered.
    pub marital_status: Option<String>,
    /// Job title.
    pub designation: String,
    /// Assigned department; cleared when the department is deleted.
    pub department_id: Option<DepartmentId>,
    /// Base salary.
    pub salary: f64,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Profile joined with its account and department for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    /// The profile row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    /// Account display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Account role.
    pub role: Role,
    /// Account profile image.
    pub profile_image: Option<String>,
    /// Department name, if assigned.
    pub department_name: Option<String>,
}

/// Data for creating an employee together with its account.
#[derive(Debug, Clone)]
pub struct CreateEmployee {
    /// Backing account.
    pub account: CreateAccount,
    /// Business key.
    pub employee_code: String,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Gender.
    pub gender: Option<String>,
    /// Marital status.
    pub marital_status: Option<String>,
    /// Job title.
    pub designation: String,
    /// Department.
    pub department_id: Option<DepartmentId>,
    /// Base salary.
    pub salary: f64,
}

/// Partial update of an employee and its account; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New role.
    pub role: Option<Role>,
    /// New marital status.
    pub marital_status: Option<String>,
    /// New job title.
    pub designation: Option<String>,
    /// New department.
    pub department_id: Option<DepartmentId>,
    /// New base salary.
    pub salary: Option<f64>,
}

impl EmployeeUpdate {
    /// Whether the update touches nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.marital_status.is_none()
            && self.designation.is_none()
            && self.department_id.is_none()
            && self.salary.is_none()
    }
}
