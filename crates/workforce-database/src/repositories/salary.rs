//! Salary record repository.

use async_trait::async_trait;
use sqlx::PgPool;

use workforce_core::error::{AppError, ErrorKind};
use workforce_core::result::AppResult;
use workforce_core::types::{EmployeeId, SalaryId};
use workforce_entity::salary::{CreateSalary, SalaryRecord, SalaryView};

/// Salary persistence.
#[async_trait]
pub trait SalaryRepository: Send + Sync {
    /// Insert a record with the derived net pay.
    async fn create(&self, data: &CreateSalary) -> AppResult<SalaryRecord>;
    /// One employee's records, latest pay date first.
    async fn list_for_employee(&self, employee_id: EmployeeId) -> AppResult<Vec<SalaryView>>;
}

/// PostgreSQL-backed [`SalaryRepository`].
#[derive(Debug, Clone)]
pub struct PgSalaryRepository {
    pool: PgPool,
}

impl PgSalaryRepository {
    /// Create a new salary repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalaryRepository for PgSalaryRepository {
    async fn create(&self, data: &CreateSalary) -> AppResult<SalaryRecord> {
        sqlx::query_as::<_, SalaryRecord>(
            "INSERT INTO salaries (id, employee_id, basic_salary, allowances, deductions, net_salary, pay_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(SalaryId::new())
        .bind(data.employee_id)
        .bind(data.basic_salary)
        .bind(data.allowances)
        .bind(data.deductions)
        .bind(data.net_salary())
        .bind(data.pay_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.constraint() == Some("salaries_employee_id_fkey") => {
                AppError::not_found(format!("Employee {} not found", data.employee_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create salary record", e),
        })
    }

    async fn list_for_employee(&self, employee_id: EmployeeId) -> AppResult<Vec<SalaryView>> {
        sqlx::query_as::<_, SalaryView>(
            "SELECT s.*, e.employee_code, a.name AS employee_name \
             FROM salaries s \
             JOIN employees e ON e.id = s.employee_id \
             JOIN accounts a ON a.id = e.account_id \
             WHERE s.employee_id = $1 \
             ORDER BY s.pay_date DESC, s.created_at DESC",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list salaries", e))
    }
}
