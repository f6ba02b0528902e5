//! Employee directory service.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use workforce_auth::password::{PasswordHasher, PasswordValidator};
use workforce_auth::rbac::RbacEnforcer;
use workforce_core::error::AppError;
use workforce_core::types::{AccountId, DepartmentId, EmployeeId};
use workforce_database::repositories::{DepartmentRepository, EmployeeRepository};
use workforce_entity::account::{CreateAccount, Role};
use workforce_entity::employee::{CreateEmployee, EmployeeProfile, EmployeeUpdate, EmployeeView};

use crate::context::RequestContext;

/// Resolves callers to employee profiles and manages the directory.
#[derive(Clone)]
pub struct EmployeeDirectory {
    employees: Arc<dyn EmployeeRepository>,
    departments: Arc<dyn DepartmentRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    rbac: Arc<RbacEnforcer>,
}

impl std::fmt::Debug for EmployeeDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeDirectory").finish_non_exhaustive()
    }
}

/// Admin input for onboarding an employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Initial password (policy-checked, then hashed).
    pub password: String,
    /// Role label; defaults to `employee`.
    pub role: Option<String>,
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
    /// Profile image reference.
    pub profile_image: Option<String>,
}

impl EmployeeDirectory {
    /// Creates a new employee directory.
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        departments: Arc<dyn DepartmentRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            employees,
            departments,
            hasher,
            validator,
            rbac,
        }
    }

    /// The profile owned by `account_id`, or `NotFound`.
    pub async fn resolve_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<EmployeeProfile, AppError> {
        self.employees
            .find_by_account(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee profile not found"))
    }

    /// Resolve `id` as a profile key first, then as an account key.
    pub async fn resolve_by_any_id(&self, id: Uuid) -> Result<EmployeeProfile, AppError> {
        if let Some(profile) = self.employees.find_by_id(EmployeeId::from_uuid(id)).await? {
            return Ok(profile);
        }
        self.employees
            .find_by_account(AccountId::from_uuid(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))
    }

    /// The profile a listing should target: an employee always gets their own.
    pub async fn resolve_target(
        &self,
        ctx: &RequestContext,
        requested: Uuid,
    ) -> Result<EmployeeProfile, AppError> {
        match ctx.role {
            Role::Employee => self.resolve_by_account(ctx.account_id).await,
            Role::Admin => self.resolve_by_any_id(requested).await,
        }
    }

    /// Create an account and its profile (admin).
    pub async fn add_employee(
        &self,
        ctx: &RequestContext,
        req: NewEmployee,
    ) -> Result<EmployeeView, AppError> {
        self.rbac.require_admin(ctx.role)?;

        let name = required(&req.name, "Name")?;
        let employee_code = required(&req.employee_code, "Employee code")?;
        let designation = required(&req.designation, "Designation")?;
        let email = req.email.clone();
        if !email.contains('@') {
            return Err(AppError::validation("Invalid email format"));
        }
        check_salary(req.salary)?;
        let role = match req.role.as_deref() {
            Some(label) => label.parse::<Role>()?,
            None => Role::Employee,
        };
        self.ensure_department(req.department_id).await?;
        self.validator.validate(&req.password, &[&email, &name])?;

        let password_hash = self.hasher.hash(&req.password).await?;
        let view = self
            .employees
            .create(&CreateEmployee {
                account: CreateAccount {
                    email,
                    password_hash,
                    name,
                    role,
                    profile_image: req.profile_image,
                },
                employee_code,
                date_of_birth: req.date_of_birth,
                gender: trimmed(req.gender),
                marital_status: trimmed(req.marital_status),
                designation,
                department_id: req.department_id,
                salary: req.salary,
            })
            .await?;

        info!(
            employee_id = %view.profile.id,
            account_id = %view.profile.account_id,
            admin_id = %ctx.account_id,
            "Employee added"
        );
        Ok(view)
    }

    /// Every employee (admin).
    pub async fn list_employees(&self, ctx: &RequestContext) -> Result<Vec<EmployeeView>, AppError> {
        self.rbac.require_admin(ctx.role)?;
        self.employees.list().await
    }

    /// One employee by profile or account key. Employees may only fetch themselves.
    pub async fn get_employee(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<EmployeeView, AppError> {
        let profile = self.resolve_by_any_id(id).await?;
        if !ctx.is_admin() && profile.account_id != ctx.account_id {
            return Err(AppError::forbidden("You may only view your own profile"));
        }
        self.view(profile.id).await
    }

    /// Partially update an employee and its account (admin).
    pub async fn update_employee(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut update: EmployeeUpdate,
    ) -> Result<EmployeeView, AppError> {
        self.rbac.require_admin(ctx.role)?;
        let profile = self.resolve_by_any_id(id).await?;

        if let Some(name) = &update.name {
            update.name = Some(required(name, "Name")?);
        }
        if let Some(designation) = &update.designation {
            update.designation = Some(required(designation, "Designation")?);
        }
        if let Some(salary) = update.salary {
            check_salary(salary)?;
        }
        self.ensure_department(update.department_id).await?;
        if update.is_empty() {
            return self.view(profile.id).await;
        }

        let view = self.employees.update(profile.id, &update).await?;
        info!(employee_id = %profile.id, admin_id = %ctx.account_id, "Employee updated");
        Ok(view)
    }

    /// Delete an employee profile with its leave and salary history (admin).
    pub async fn delete_employee(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.rbac.require_admin(ctx.role)?;
        let profile = self.resolve_by_any_id(id).await?;
        if !self.employees.delete(profile.id).await? {
            return Err(AppError::not_found(format!("Employee {id} not found")));
        }
        info!(employee_id = %profile.id, admin_id = %ctx.account_id, "Employee deleted");
        Ok(())
    }

    /// Employees assigned to one department (admin).
    pub async fn list_by_department(
        &self,
        ctx: &RequestContext,
        department_id: DepartmentId,
    ) -> Result<Vec<EmployeeView>, AppError> {
        self.rbac.require_admin(ctx.role)?;
        self.ensure_department(Some(department_id)).await?;
        self.employees.list_by_department(department_id).await
    }

    async fn view(&self, id: EmployeeId) -> Result<EmployeeView, AppError> {
        self.employees
            .find_view(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))
    }

    async fn ensure_department(&self, id: Option<DepartmentId>) -> Result<(), AppError> {
        let Some(id) = id else { return Ok(()) };
        match self.departments.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Department {id} not found"))),
        }
    }
}

fn required(value: &str, field: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_salary(value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation("Salary must be a non-negative number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use workforce_core::ErrorKind;
    use workforce_entity::account::Role;
    use workforce_entity::employee::EmployeeUpdate;

    use crate::testing::{Fixture, new_employee};

    #[tokio::test]
    async fn test_add_and_resolve_both_ways() {
        let fx = Fixture::new();
        let admin = fx.admin_ctx().await;
        let view = fx
            .directory
            .add_employee(&admin, new_employee("EMP-1", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(view.role, Role::Employee);
        assert_eq!(view.email, "alice@example.com");

        let by_profile = fx
            .directory
            .resolve_by_any_id(view.profile.id.into_uuid())
            .await
            .unwrap();
        let by_account = fx
            .directory
            .resolve_by_any_id(view.profile.account_id.into_uuid())
            .await
            .unwrap();
        assert_eq!(by_profile.id, by_account.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let fx = Fixture::new();
        let admin = fx.admin_ctx().await;
        fx.directory
            .add_employee(&admin, new_employee("EMP-1", "alice@example.com"))
            .await
            .unwrap();
        let err = fx
            .directory
            .add_employee(&admin, new_employee("EMP-2", "ALICE@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let fx = Fixture::new();
        let admin = fx.admin_ctx().await;
        let mut req = new_employee("EMP-1", "alice@example.com");
        req.password = "password".into();
        let err = fx.directory.add_employee(&admin, req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_employee_sees_only_self() {
        let fx = Fixture::new();
        let (alice_ctx, alice) = fx.employee_ctx("EMP-1", "alice@example.com").await;
        let (_, bob) = fx.employee_ctx("EMP-2", "bob@example.com").await;

        assert!(
            fx.directory
                .get_employee(&alice_ctx, alice.profile.id.into_uuid())
                .await
                .is_ok()
        );
        let err = fx
            .directory
            .get_employee(&alice_ctx, bob.profile.id.into_uuid())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let err = fx.directory.list_employees(&alice_ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_update_changes_account_fields() {
        let fx = Fixture::new();
        let admin = fx.admin_ctx().await;
        let (_, alice) = fx.employee_ctx("EMP-1", "alice@example.com").await;

        let view = fx
            .directory
            .update_employee(
                &admin,
                alice.profile.account_id.into_uuid(),
                EmployeeUpdate {
                    name: Some("Alice Smith".into()),
                    designation: Some("Lead".into()),
                    salary: Some(9000.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(view.name, "Alice Smith");
        assert_eq!(view.profile.designation, "Lead");
        assert_eq!(view.profile.salary, 9000.0);

        let err = fx
            .directory
            .update_employee(
                &admin,
                alice.profile.id.into_uuid(),
                EmployeeUpdate {
                    salary: Some(-1.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
