//! Salary record service.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use workforce_auth::rbac::RbacEnforcer;
use workforce_core::error::AppError;
use workforce_database::repositories::SalaryRepository;
use workforce_entity::salary::{CreateSalary, SalaryRecord, SalaryView};

use crate::context::RequestContext;
use crate::employee::EmployeeDirectory;

/// Admin input for recording a payment.
#[derive(Debug, Clone)]
pub struct NewSalary {
    /// Profile or account key of the employee paid.
    pub employee_id: Uuid,
    /// Base amount.
    pub basic_salary: f64,
    /// Additions.
    pub allowances: f64,
    /// Withholdings.
    pub deductions: f64,
    /// Payment date.
    pub pay_date: NaiveDate,
}

/// Records and lists salary payments.
#[derive(Clone)]
pub struct SalaryService {
    salaries: Arc<dyn SalaryRepository>,
    directory: Arc<EmployeeDirectory>,
    rbac: Arc<RbacEnforcer>,
}

impl std::fmt::Debug for SalaryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalaryService").finish_non_exhaustive()
    }
}

impl SalaryService {
    /// Creates a new salary service.
    pub fn new(
        salaries: Arc<dyn SalaryRepository>,
        directory: Arc<EmployeeDirectory>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            salaries,
            directory,
            rbac,
        }
    }

    /// Record a payment (admin). Net pay is computed, never supplied.
    pub async fn add(&self, ctx: &RequestContext, req: NewSalary) -> Result<SalaryRecord, AppError> {
        self.rbac.require_admin(ctx.role)?;
        for (label, value) in [
            ("Basic salary", req.basic_salary),
            ("Allowances", req.allowances),
            ("Deductions", req.deductions),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::validation(format!(
                    "{label} must be a non-negative number"
                )));
            }
        }

        let profile = self.directory.resolve_by_any_id(req.employee_id).await?;
        let record = self
            .salaries
            .create(&CreateSalary {
                employee_id: profile.id,
                basic_salary: req.basic_salary,
                allowances: req.allowances,
                deductions: req.deductions,
                pay_date: req.pay_date,
            })
            .await?;
        info!(
            salary_id = %record.id,
            employee_id = %profile.id,
            admin_id = %ctx.account_id,
            "Salary recorded"
        );
        Ok(record)
    }

    /// Payment history, newest pay date first. Employees always see their own.
    pub async fn list(&self, ctx: &RequestContext, target: Uuid) -> Result<Vec<SalaryView>, AppError> {
        let profile = self.directory.resolve_target(ctx, target).await?;
        self.salaries.list_for_employee(profile.id).await
    }
}
