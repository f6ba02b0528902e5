//! Department CRUD service (admin only).

use std::sync::Arc;

use tracing::info;

use workforce_auth::rbac::RbacEnforcer;
use workforce_core::error::AppError;
use workforce_core::types::DepartmentId;
use workforce_database::repositories::DepartmentRepository;
use workforce_entity::department::{Department, DepartmentInput};

use crate::context::RequestContext;

/// Manages departments.
#[derive(Clone)]
pub struct DepartmentService {
    departments: Arc<dyn DepartmentRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl std::fmt::Debug for DepartmentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepartmentService").finish_non_exhaustive()
    }
}

impl DepartmentService {
    /// Creates a new department service.
    pub fn new(departments: Arc<dyn DepartmentRepository>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { departments, rbac }
    }

    /// Create a department. Names are unique.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: DepartmentInput,
    ) -> Result<Department, AppError> {
        self.rbac.require_admin(ctx.role)?;
        let input = normalize(input)?;
        let department = self.departments.create(&input).await?;
        info!(department_id = %department.id, name = %department.name, "Department created");
        Ok(department)
    }

    /// All departments ordered by name.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Department>, AppError> {
        self.rbac.require_admin(ctx.role)?;
        self.departments.list().await
    }

    /// One department.
    pub async fn get(&self, ctx: &RequestContext, id: DepartmentId) -> Result<Department, AppError> {
        self.rbac.require_admin(ctx.role)?;
        self.departments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Department {id} not found")))
    }

    /// Rename or redescribe a department.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: DepartmentId,
        input: DepartmentInput,
    ) -> Result<Department, AppError> {
        self.rbac.require_admin(ctx.role)?;
        let input = normalize(input)?;
        let department = self.departments.update(id, &input).await?;
        info!(department_id = %id, "Department updated");
        Ok(department)
    }

    /// Delete a department. Its employees become unassigned.
    pub async fn delete(&self, ctx: &RequestContext, id: DepartmentId) -> Result<(), AppError> {
        self.rbac.require_admin(ctx.role)?;
        if !self.departments.delete(id).await? {
            return Err(AppError::not_found(format!("Department {id} not found")));
        }
        info!(department_id = %id, admin_id = %ctx.account_id, "Department deleted");
        Ok(())
    }
}

fn normalize(input: DepartmentInput) -> Result<DepartmentInput, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Department name is required"));
    }
    Ok(DepartmentInput {
        name: name.to_string(),
        description: input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
    })
}
