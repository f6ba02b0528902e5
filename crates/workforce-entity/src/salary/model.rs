//! Salary record entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use workforce_core::types::{EmployeeId, SalaryId};

/// One payout to an employee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRecord {
    /// Storage key.
    pub id: SalaryId,
    /// Paid employee.
    pub employee_id: EmployeeId,
    /// Basic salary component.
    pub basic_salary: f64,
    /// Allowances added on top.
    pub allowances: f64,
    /// Deductions subtracted.
    pub deductions: f64,
    /// `basic_salary + allowances - deductions`.
    pub net_salary: f64,
    /// Pay date.
    pub pay_date: NaiveDate,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Salary record with the employee's code and name attached.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalaryView {
    /// The salary row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub record: SalaryRecord,
    /// Business key of the paid employee.
    pub employee_code: String,
    /// Display name of the paid employee.
    pub employee_name: String,
}

/// Input for a new salary record. Net pay is derived, never supplied.
#[derive(Debug, Clone)]
pub struct CreateSalary {
    /// Paid employee.
    pub employee_id: EmployeeId,
    /// Basic salary component.
    pub basic_salary: f64,
    /// Allowances.
    pub allowances: f64,
    /// Deductions.
    pub deductions: f64,
    /// Pay date.
    pub pay_date: NaiveDate,
}

impl CreateSalary {
    /// Net pay for this input.
    pub fn net_salary(&self) -> f64 {
        self.basic_salary + self.allowances - self.deductions
    }
}
