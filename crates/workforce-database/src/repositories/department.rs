//! Department repository.

use async_trait::async_trait;
use sqlx::PgPool;

use workforce_core::error::{AppError, ErrorKind};
use workforce_core::result::AppResult;
use workforce_core::types::DepartmentId;
use workforce_entity::department::{Department, DepartmentInput};

/// Department persistence.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Insert a department; duplicate names are a conflict.
    async fn create(&self, data: &DepartmentInput) -> AppResult<Department>;
    /// Find a department by key.
    async fn find_by_id(&self, id: DepartmentId) -> AppResult<Option<Department>>;
    /// All departments by name.
    async fn list(&self) -> AppResult<Vec<Department>>;
    /// Replace name and description.
    async fn update(&self, id: DepartmentId, data: &DepartmentInput) -> AppResult<Department>;
    /// Delete a department; employees keep their profile with no department.
    async fn delete(&self, id: DepartmentId) -> AppResult<bool>;
}

/// PostgreSQL-backed [`DepartmentRepository`].
#[derive(Debug, Clone)]
pub struct PgDepartmentRepository {
    pool: PgPool,
}

impl PgDepartmentRepository {
    /// Create a new department repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_name_conflict(e: sqlx::Error, name: &str, action: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db) if db.constraint() == Some("departments_name_key") => {
            AppError::conflict(format!("Department '{name}' already exists"))
        }
        _ => AppError::with_source(ErrorKind::Database, action, e),
    }
}

#[async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    async fn create(&self, data: &DepartmentInput) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            "INSERT INTO departments (id, name, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(DepartmentId::new())
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, &data.name, "Failed to create department"))
    }

    async fn find_by_id(&self, id: DepartmentId) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find department", e))
    }

    async fn list(&self) -> AppResult<Vec<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list departments", e)
            })
    }

    async fn update(&self, id: DepartmentId, data: &DepartmentInput) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            "UPDATE departments SET name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, &data.name, "Failed to update department"))?
        .ok_or_else(|| AppError::not_found(format!("Department {id} not found")))
    }

    async fn delete(&self, id: DepartmentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete department", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
