//! Leave request repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use workforce_core::error::{AppError, ErrorKind};
use workforce_core::result::AppResult;
use workforce_core::types::pagination::{PageRequest, PageResponse};
use workforce_core::types::{EmployeeId, LeaveId};
use workforce_entity::leave::{
    CreateLeave, LeaveDecision, LeaveFilter, LeaveRequest, LeaveStatus, LeaveView,
};

/// Leave request persistence.
#[async_trait]
pub trait LeaveRepository: Send + Sync {
    /// Insert a `Pending` request unless it overlaps an active one of the same employee.
    async fn create(&self, data: &CreateLeave) -> AppResult<LeaveRequest>;
    /// Joined view of one request.
    async fn find_view(&self, id: LeaveId) -> AppResult<Option<LeaveView>>;
    /// One employee's requests, filtered, newest first, paginated.
    async fn list_for_employee(
        &self,
        employee_id: EmployeeId,
        filter: &LeaveFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<LeaveRequest>>;
    /// Every request with employee display fields, newest first.
    async fn list_all(&self) -> AppResult<Vec<LeaveView>>;
    /// Apply an admin decision atomically.
    ///
    /// Fails with `NotFound` if the request is absent and `Conflict` if it
    /// was already decided the other way.
    async fn decide(&self, id: LeaveId, decision: LeaveDecision) -> AppResult<LeaveRequest>;
}

/// PostgreSQL-backed [`LeaveRepository`].
#[derive(Debug, Clone)]
pub struct PgLeaveRepository {
    pool: PgPool,
}

impl PgLeaveRepository {
    /// Create a new leave repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const VIEW_SELECT: &str = "SELECT l.*, e.account_id, e.employee_code, \
                                  a.name AS employee_name, a.email AS employee_email, \
                                  e.designation, a.profile_image, d.name AS department_name \
                           FROM leave_requests l \
                           JOIN employees e ON e.id = l.employee_id \
                           JOIN accounts a ON a.id = e.account_id \
                           LEFT JOIN departments d ON d.id = e.department_id";

fn db_err(action: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, action, e)
}

#[async_trait]
impl LeaveRepository for PgLeaveRepository {
    async fn create(&self, data: &CreateLeave) -> AppResult<LeaveRequest> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        // Row lock serialises concurrent filings by the same employee.
        let locked: Option<EmployeeId> =
            sqlx::query_scalar("SELECT id FROM employees WHERE id = $1 FOR UPDATE")
                .bind(data.employee_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_err("Failed to lock employee"))?;
        if locked.is_none() {
            return Err(AppError::not_found(format!(
                "Employee {} not found",
                data.employee_id
            )));
        }

        let overlapping: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM leave_requests \
                            WHERE employee_id = $1 \
                              AND status IN ('Pending', 'Approved') \
                              AND start_date <= $3 AND $2 <= end_date)",
        )
        .bind(data.employee_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err("Failed to check overlapping leave"))?;
        if overlapping {
            return Err(AppError::conflict(
                "Leave request overlaps an existing pending or approved request",
            ));
        }

        let leave = sqlx::query_as::<_, LeaveRequest>(
            "INSERT INTO leave_requests (id, employee_id, leave_type, start_date, end_date, reason, status) \
             VALUES ($1, $2, $3, $4, $5, $6, 'Pending') \
             RETURNING *",
        )
        .bind(LeaveId::new())
        .bind(data.employee_id)
        .bind(data.leave_type)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(&data.reason)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.constraint().is_some_and(|c| {
                c == "leave_requests_date_order" || c == "leave_requests_reason_present"
            }) => AppError::validation("Leave request failed date or reason checks"),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create leave request", e),
        })?;

        tx.commit()
            .await
            .map_err(db_err("Failed to commit leave request"))?;
        Ok(leave)
    }

    async fn find_view(&self, id: LeaveId) -> AppResult<Option<LeaveView>> {
        sqlx::query_as::<_, LeaveView>(&format!("{VIEW_SELECT} WHERE l.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to load leave request"))
    }

    async fn list_for_employee(
        &self,
        employee_id: EmployeeId,
        filter: &LeaveFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<LeaveRequest>> {
        const WHERE: &str = "WHERE employee_id = $1 \
                               AND ($2::leave_status IS NULL OR status = $2) \
                               AND ($3::leave_type IS NULL OR leave_type = $3)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM leave_requests {WHERE}"))
                .bind(employee_id)
                .bind(filter.status)
                .bind(filter.leave_type)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err("Failed to count leave requests"))?;
        let total = u64::try_from(total).unwrap_or_default();

        let offset = match i64::try_from(page.offset()) {
            Ok(offset) if page.offset() < total => offset,
            _ => return Ok(PageResponse::new(Vec::new(), page, total)),
        };
        let limit = i64::try_from(page.limit).unwrap_or(i64::MAX);

        let items = sqlx::query_as::<_, LeaveRequest>(&format!(
            "SELECT * FROM leave_requests {WHERE} \
             ORDER BY created_at DESC, id DESC LIMIT $4 OFFSET $5"
        ))
        .bind(employee_id)
        .bind(filter.status)
        .bind(filter.leave_type)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list leave requests"))?;

        Ok(PageResponse::new(items, page, total))
    }

    async fn list_all(&self) -> AppResult<Vec<LeaveView>> {
        sqlx::query_as::<_, LeaveView>(&format!(
            "{VIEW_SELECT} ORDER BY l.created_at DESC, l.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list all leave requests"))
    }

    async fn decide(&self, id: LeaveId, decision: LeaveDecision) -> AppResult<LeaveRequest> {
        let target = decision.target();
        let updated = sqlx::query_as::<_, LeaveRequest>(
            "UPDATE leave_requests SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND (status = 'Pending' OR status = $2) \
             RETURNING *",
        )
        .bind(id)
        .bind(target)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to update leave status"))?;

        if let Some(leave) = updated {
            return Ok(leave);
        }

        let current: Option<LeaveStatus> =
            sqlx::query_scalar("SELECT status FROM leave_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err("Failed to read leave status"))?;

        match current {
            None => Err(AppError::not_found(format!("Leave request {id} not found"))),
            Some(status) => {
                debug!(leave_id = %id, %status, decision = decision.verb(), "Decision refused");
                Err(AppError::conflict(format!(
                    "Leave request is already {status} and cannot be changed"
                )))
            }
        }
    }
}
