//! Employee profile repository.

use async_trait::async_trait;
use sqlx::PgPool;

use workforce_core::error::{AppError, ErrorKind};
use workforce_core::result::AppResult;
use workforce_core::types::{AccountId, DepartmentId, EmployeeId};
use workforce_entity::employee::{CreateEmployee, EmployeeProfile, EmployeeUpdate, EmployeeView};

use super::account::map_account_insert_error;

/// Employee directory persistence.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Create an account and its profile atomically.
    async fn create(&self, data: &CreateEmployee) -> AppResult<EmployeeView>;
    /// Find a profile by its own key.
    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<EmployeeProfile>>;
    /// Find the profile owned by an account.
    async fn find_by_account(&self, account_id: AccountId) -> AppResult<Option<EmployeeProfile>>;
    /// Joined view of one profile.
    async fn find_view(&self, id: EmployeeId) -> AppResult<Option<EmployeeView>>;
    /// Joined views of every profile, newest first.
    async fn list(&self) -> AppResult<Vec<EmployeeView>>;
    /// Joined views of one department's profiles, newest first.
    async fn list_by_department(&self, department_id: DepartmentId)
    -> AppResult<Vec<EmployeeView>>;
    /// Apply a partial update to the profile and its account.
    async fn update(&self, id: EmployeeId, data: &EmployeeUpdate) -> AppResult<EmployeeView>;
    /// Delete a profile; its leave and salary rows go with it.
    async fn delete(&self, id: EmployeeId) -> AppResult<bool>;
}

/// PostgreSQL-backed [`EmployeeRepository`].
#[derive(Debug, Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    /// Create a new employee repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const VIEW_SELECT: &str = "SELECT e.*, a.name, a.email, a.role, a.profile_image, \
                                  d.name AS department_name \
                           FROM employees e \
                           JOIN accounts a ON a.id = e.account_id \
                           LEFT JOIN departments d ON d.id = e.department_id";

fn map_profile_write_error(e: sqlx::Error, action: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db)
            if db.constraint() == Some("employees_employee_code_key") =>
        {
            AppError::conflict("Employee code is already in use")
        }
        sqlx::Error::Database(ref db)
            if db.constraint() == Some("employees_department_id_fkey") =>
        {
            AppError::validation("Department does not exist")
        }
        sqlx::Error::Database(ref db) if db.constraint() == Some("employees_account_id_key") => {
            AppError::conflict("Account already has an employee profile")
        }
        _ => AppError::with_source(ErrorKind::Database, action, e),
    }
}

fn db_err(action: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, action, e)
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn create(&self, data: &CreateEmployee) -> AppResult<EmployeeView> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let account_id: AccountId = sqlx::query_scalar(
            "INSERT INTO accounts (id, email, password_hash, name, role, profile_image) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(AccountId::new())
        .bind(&data.account.email)
        .bind(&data.account.password_hash)
        .bind(&data.account.name)
        .bind(data.account.role)
        .bind(&data.account.profile_image)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_account_insert_error(e, &data.account.email))?;

        let employee_id: EmployeeId = sqlx::query_scalar(
            "INSERT INTO employees (id, account_id, employee_code, date_of_birth, gender, \
                                    marital_status, designation, department_id, salary) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
        )
        .bind(EmployeeId::new())
        .bind(account_id)
        .bind(&data.employee_code)
        .bind(data.date_of_birth)
        .bind(&data.gender)
        .bind(&data.marital_status)
        .bind(&data.designation)
        .bind(data.department_id)
        .bind(data.salary)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_profile_write_error(e, "Failed to create employee"))?;

        let view = sqlx::query_as::<_, EmployeeView>(&format!("{VIEW_SELECT} WHERE e.id = $1"))
            .bind(employee_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err("Failed to load created employee"))?;

        tx.commit()
            .await
            .map_err(db_err("Failed to commit employee creation"))?;
        Ok(view)
    }

    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<EmployeeProfile>> {
        sqlx::query_as::<_, EmployeeProfile>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find employee by id"))
    }

    async fn find_by_account(&self, account_id: AccountId) -> AppResult<Option<EmployeeProfile>> {
        sqlx::query_as::<_, EmployeeProfile>("SELECT * FROM employees WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to find employee by account"))
    }

    async fn find_view(&self, id: EmployeeId) -> AppResult<Option<EmployeeView>> {
        sqlx::query_as::<_, EmployeeView>(&format!("{VIEW_SELECT} WHERE e.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to load employee"))
    }

    async fn list(&self) -> AppResult<Vec<EmployeeView>> {
        sqlx::query_as::<_, EmployeeView>(&format!(
            "{VIEW_SELECT} ORDER BY e.created_at DESC, e.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list employees"))
    }

    async fn list_by_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<EmployeeView>> {
        sqlx::query_as::<_, EmployeeView>(&format!(
            "{VIEW_SELECT} WHERE e.department_id = $1 ORDER BY e.created_at DESC, e.id DESC"
        ))
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list employees by department"))
    }

    async fn update(&self, id: EmployeeId, data: &EmployeeUpdate) -> AppResult<EmployeeView> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let account_id: AccountId = sqlx::query_scalar(
            "UPDATE employees SET marital_status = COALESCE($2, marital_status), \
                                  designation = COALESCE($3, designation), \
                                  department_id = COALESCE($4, department_id), \
                                  salary = COALESCE($5, salary), \
                                  updated_at = NOW() \
             WHERE id = $1 RETURNING account_id",
        )
        .bind(id)
        .bind(&data.marital_status)
        .bind(&data.designation)
        .bind(data.department_id)
        .bind(data.salary)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_profile_write_error(e, "Failed to update employee"))?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;

        if data.name.is_some() || data.role.is_some() {
            sqlx::query(
                "UPDATE accounts SET name = COALESCE($2, name), role = COALESCE($3, role), \
                                     updated_at = NOW() \
                 WHERE id = $1",
            )
            .bind(account_id)
            .bind(&data.name)
            .bind(data.role)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to update employee account"))?;
        }

        let view = sqlx::query_as::<_, EmployeeView>(&format!("{VIEW_SELECT} WHERE e.id = $1"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err("Failed to load updated employee"))?;

        tx.commit()
            .await
            .map_err(db_err("Failed to commit employee update"))?;
        Ok(view)
    }

    async fn delete(&self, id: EmployeeId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err("Failed to delete employee"))?;
        Ok(result.rows_affected() > 0)
    }
}
