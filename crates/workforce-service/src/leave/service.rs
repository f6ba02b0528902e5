//! Leave request engine: filing, scoped listing, detail, and decisions.
//!
//! Visibility rules:
//!
//! - an `employee` caller files, lists, and views only their own requests,
//!   whatever ids the request carries;
//! - an `admin` caller may file on behalf of any account, list any
//!   employee's requests, view any request, and approve or reject.
//!
//! `Approved` and `Rejected` are terminal. Repeating the decision that
//! produced the current status succeeds; the opposite decision conflicts.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use workforce_auth::rbac::RbacEnforcer;
use workforce_core::error::AppError;
use workforce_core::types::pagination::{PageRequest, PageResponse};
use workforce_core::types::{AccountId, LeaveId};
use workforce_database::repositories::LeaveRepository;
use workforce_entity::account::Role;
use workforce_entity::leave::{
    CreateLeave, LeaveDecision, LeaveFilter, LeaveRequest, LeaveStatus, LeaveType, LeaveView,
};

use crate::context::RequestContext;
use crate::employee::EmployeeDirectory;

/// Input for filing a leave request.
#[derive(Debug, Clone)]
pub struct NewLeave {
    /// Account to file for; admins only, employees may only name themselves.
    pub user_id: Option<AccountId>,
    /// Leave type label, e.g. `"Annual Leave"`.
    pub leave_type: String,
    /// First day off.
    pub start_date: NaiveDate,
    /// Last day off.
    pub end_date: NaiveDate,
    /// Justification.
    pub reason: String,
}

/// Raw listing filters as received from the query string.
#[derive(Debug, Clone, Default)]
pub struct LeaveQuery {
    /// Status label.
    pub status: Option<String>,
    /// Leave type label.
    pub leave_type: Option<String>,
}

impl LeaveQuery {
    /// Parse labels into a typed filter. Blank values mean "any".
    pub fn parse(&self) -> Result<LeaveFilter, AppError> {
        let status = non_blank(self.status.as_deref())
            .map(str::parse::<LeaveStatus>)
            .transpose()?;
        let leave_type = non_blank(self.leave_type.as_deref())
            .map(str::parse::<LeaveType>)
            .transpose()?;
        Ok(LeaveFilter { status, leave_type })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The leave request engine.
#[derive(Clone)]
pub struct LeaveService {
    leaves: Arc<dyn LeaveRepository>,
    directory: Arc<EmployeeDirectory>,
    rbac: Arc<RbacEnforcer>,
}

impl std::fmt::Debug for LeaveService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaveService").finish_non_exhaustive()
    }
}

impl LeaveService {
    /// Creates a new leave service.
    pub fn new(
        leaves: Arc<dyn LeaveRepository>,
        directory: Arc<EmployeeDirectory>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            leaves,
            directory,
            rbac,
        }
    }

    /// File a new `Pending` request.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: NewLeave,
    ) -> Result<LeaveRequest, AppError> {
        let owner = match ctx.role {
            Role::Employee => match req.user_id {
                Some(id) if id != ctx.account_id => {
                    return Err(AppError::forbidden(
                        "Employees may only file leave for themselves",
                    ));
                }
                _ => ctx.account_id,
            },
            Role::Admin => req.user_id.unwrap_or(ctx.account_id),
        };

        let leave_type: LeaveType = req.leave_type.parse()?;
        if req.start_date > req.end_date {
            return Err(AppError::validation(
                "Start date must be on or before end date",
            ));
        }
        let reason = req.reason.trim();
        if reason.is_empty() {
            return Err(AppError::validation("Reason is required"));
        }

        let profile = self.directory.resolve_by_account(owner).await?;
        let leave = self
            .leaves
            .create(&CreateLeave {
                employee_id: profile.id,
                leave_type,
                start_date: req.start_date,
                end_date: req.end_date,
                reason: reason.to_string(),
            })
            .await?;

        info!(
            leave_id = %leave.id,
            employee_id = %profile.id,
            filed_by = %ctx.account_id,
            leave_type = %leave.leave_type,
            days = leave.duration_days(),
            "Leave request filed"
        );
        Ok(leave)
    }

    /// One employee's requests, newest first.
    ///
    /// For an employee caller `target` is ignored and their own profile is used.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        target: Uuid,
        query: &LeaveQuery,
        page: &PageRequest,
    ) -> Result<PageResponse<LeaveRequest>, AppError> {
        let filter = query.parse()?;
        let profile = self.directory.resolve_target(ctx, target).await?;
        self.leaves
            .list_for_employee(profile.id, &filter, page)
            .await
    }

    /// Every request in the system (admin).
    pub async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<LeaveView>, AppError> {
        self.rbac.require_admin(ctx.role)?;
        self.leaves.list_all().await
    }

    /// One request with the owner's display fields.
    pub async fn detail(&self, ctx: &RequestContext, id: LeaveId) -> Result<LeaveView, AppError> {
        let view = self
            .leaves
            .find_view(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Leave request {id} not found")))?;
        if !ctx.is_admin() && view.account_id != ctx.account_id {
            return Err(AppError::forbidden(
                "You may only view your own leave requests",
            ));
        }
        Ok(view)
    }

    /// Approve a pending request (admin).
    pub async fn approve(&self, ctx: &RequestContext, id: LeaveId) -> Result<LeaveRequest, AppError> {
        self.decide(ctx, id, LeaveDecision::Approve).await
    }

    /// Reject a pending request (admin).
    pub async fn reject(&self, ctx: &RequestContext, id: LeaveId) -> Result<LeaveRequest, AppError> {
        self.decide(ctx, id, LeaveDecision::Reject).await
    }

    async fn decide(
        &self,
        ctx: &RequestContext,
        id: LeaveId,
        decision: LeaveDecision,
    ) -> Result<LeaveRequest, AppError> {
        self.rbac.require_admin(ctx.role)?;
        let leave = self.leaves.decide(id, decision).await?;
        info!(
            leave_id = %id,
            admin_id = %ctx.account_id,
            decision = decision.verb(),
            status = %leave.status,
            "Leave request decided"
        );
        Ok(leave)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use workforce_core::ErrorKind;
    use workforce_core::types::pagination::PageRequest;
    use workforce_core::types::{AccountId, LeaveId};
    use workforce_entity::leave::LeaveStatus;

    use super::{LeaveQuery, NewLeave};
    use crate::testing::Fixture;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn annual(start: NaiveDate, end: NaiveDate) -> NewLeave {
        NewLeave {
            user_id: None,
            leave_type: "Annual Leave".into(),
            start_date: start,
            end_date: end,
            reason: "Family trip".into(),
        }
    }

    #[tokio::test]
    async fn test_create_is_pending_with_inclusive_duration() {
        let fx = Fixture::new();
        let (alice, _) = fx.employee_ctx("EMP-1", "alice@example.com").await;

        let leave = fx
            .leave
            .create(&alice, annual(date(1, 10), date(1, 12)))
            .await
            .unwrap();
        assert_eq!(leave.status, LeaveStatus::Pending);
        assert_eq!(leave.duration_days(), 3);
        assert_eq!(leave.created_at, leave.updated_at);
    }

    #[tokio::test]
    async fn test_reversed_dates_persist_nothing() {
        let fx = Fixture::new();
        let (alice, _) = fx.employee_ctx("EMP-1", "alice@example.com").await;

        let err = fx
            .leave
            .create(&alice, annual(date(1, 12), date(1, 10)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let page = fx
            .leave
            .list(&alice, Uuid::nil(), &LeaveQuery::default(), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 0);
    }

    #[tokio::test]
    async fn test_bad_type_and_blank_reason() {
        let fx = Fixture::new();
        let (alice, _) = fx.employee_ctx("EMP-1", "alice@example.com").await;

        let mut req = annual(date(1, 10), date(1, 12));
        req.leave_type = "Sabbatical".into();
        assert_eq!(
            fx.leave.create(&alice, req).await.unwrap_err().kind,
            ErrorKind::Validation
        );

        let mut req = annual(date(1, 10), date(1, 12));
        req.reason = "   ".into();
        assert_eq!(
            fx.leave.create(&alice, req).await.unwrap_err().kind,
            ErrorKind::Validation
        );
    }

    #[tokio::test]
    async fn test_employee_cannot_file_for_someone_else() {
        let fx = Fixture::new();
        let (alice, _) = fx.employee_ctx("EMP-1", "alice@example.com").await;
        let (_, bob) = fx.employee_ctx("EMP-2", "bob@example.com").await;

        let mut req = annual(date(1, 10), date(1, 12));
        req.user_id = Some(bob.profile.account_id);
        let err = fx.leave.create(&alice, req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let mut req = annual(date(1, 10), date(1, 12));
        req.user_id = Some(alice.account_id);
        assert!(fx.leave.create(&alice, req).await.is_ok());
    }

    #[tokio::test]
    async fn test_admin_files_on_behalf() {
        let fx = Fixture::new();
        let admin = fx.admin_ctx().await;
        let (_, bob) = fx.employee_ctx("EMP-2", "bob@example.com").await;

        let err = fx
            .leave
            .create(&admin, annual(date(1, 10), date(1, 12)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let mut req = annual(date(1, 10), date(1, 12));
        req.user_id = Some(bob.profile.account_id);
        let leave = fx.leave.create(&admin, req).await.unwrap();
        assert_eq!(leave.employee_id, bob.profile.id);

        let mut req = annual(date(1, 10), date(1, 12));
        req.user_id = Some(AccountId::new());
        assert_eq!(
            fx.leave.create(&admin, req).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_terminal_lock() {
        let fx = Fixture::new();
        let admin = fx.admin_ctx().await;
        let (alice, _) = fx.employee_ctx("EMP-1", "alice@example.com").await;
        let leave = fx
            .leave
            .create(&alice, annual(date(1, 10), date(1, 12)))
            .await
            .unwrap();

        let approved = fx.leave.approve(&admin, leave.id).await.unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        let again = fx.leave.approve(&admin, leave.id).await.unwrap();
        assert_eq!(again.status, LeaveStatus::Approved);

        let err = fx.leave.reject(&admin, leave.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        let detail = fx.leave.detail(&admin, leave.id).await.unwrap();
        assert_eq!(detail.leave.status, LeaveStatus::Approved);

        let err = fx.leave.approve(&alice, leave.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        let err = fx.leave.approve(&admin, LeaveId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_employee_listing_is_always_scoped() {
        let fx = Fixture::new();
        let admin = fx.admin_ctx().await;
        let (alice, alice_view) = fx.employee_ctx("EMP-1", "alice@example.com").await;
        let (bob, bob_view) = fx.employee_ctx("EMP-2", "bob@example.com").await;
        fx.leave
            .create(&alice, annual(date(1, 10), date(1, 12)))
            .await
            .unwrap();
        fx.leave
            .create(&bob, annual(date(2, 1), date(2, 2)))
            .await
            .unwrap();

        for target in [
            bob_view.profile.id.into_uuid(),
            bob_view.profile.account_id.into_uuid(),
            Uuid::new_v4(),
        ] {
            let page = fx
                .leave
                .list(&alice, target, &LeaveQuery::default(), &PageRequest::default())
                .await
                .unwrap();
            assert_eq!(page.items.len(), 1);
            assert!(page.items.iter().all(|l| l.employee_id == alice_view.profile.id));
        }

        let page = fx
            .leave
            .list(
                &admin,
                bob_view.profile.account_id.into_uuid(),
                &LeaveQuery::default(),
                &PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.items[0].employee_id, bob_view.profile.id);

        let err = fx
            .leave
            .list(&admin, Uuid::new_v4(), &LeaveQuery::default(), &PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_detail_ownership() {
        let fx = Fixture::new();
        let (alice, _) = fx.employee_ctx("EMP-1", "alice@example.com").await;
        let (bob, _) = fx.employee_ctx("EMP-2", "bob@example.com").await;
        let leave = fx
            .leave
            .create(&alice, annual(date(1, 10), date(1, 12)))
            .await
            .unwrap();

        let view = fx.leave.detail(&alice, leave.id).await.unwrap();
        assert_eq!(view.employee_code, "EMP-1");
        let err = fx.leave.detail(&bob, leave.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_filters() {
        let fx = Fixture::new();
        let admin = fx.admin_ctx().await;
        let (alice, _) = fx.employee_ctx("EMP-1", "alice@example.com").await;
        let first = fx
            .leave
            .create(&alice, annual(date(1, 10), date(1, 12)))
            .await
            .unwrap();
        let mut sick = annual(date(3, 1), date(3, 1));
        sick.leave_type = "Sick Leave".into();
        fx.leave.create(&alice, sick).await.unwrap();
        fx.leave.approve(&admin, first.id).await.unwrap();

        let query = LeaveQuery {
            status: Some("Approved".into()),
            leave_type: None,
        };
        let page = fx
            .leave
            .list(&alice, Uuid::nil(), &query, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, first.id);

        let query = LeaveQuery {
            status: None,
            leave_type: Some("Sick Leave".into()),
        };
        let page = fx
            .leave
            .list(&alice, Uuid::nil(), &query, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);

        let query = LeaveQuery {
            status: Some("Done".into()),
            leave_type: None,
        };
        let err = fx
            .leave
            .list(&alice, Uuid::nil(), &query, &PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
