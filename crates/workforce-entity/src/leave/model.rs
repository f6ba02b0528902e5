//! Leave request entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use workforce_core::types::{AccountId, EmployeeId, LeaveId};

use super::kind::LeaveType;
use super::status::LeaveStatus;

/// A request for time off by one employee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    /// Storage key.
    pub id: LeaveId,
    /// Requesting employee profile.
    pub employee_id: EmployeeId,
    /// Category.
    pub leave_type: LeaveType,
    /// First day off (inclusive).
    pub start_date: NaiveDate,
    /// Last day off (inclusive).
    pub end_date: NaiveDate,
    /// Free-text justification.
    pub reason: String,
    /// Lifecycle status.
    pub status: LeaveStatus,
    /// When the request was filed.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Inclusive length of the request in calendar days.
    pub fn duration_days(&self) -> i64 {
        duration_days(self.start_date, self.end_date)
    }

    /// Whether this request's dates intersect `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}

/// Inclusive day count between two dates.
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Leave request joined with the owning employee's display fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaveView {
    /// The leave row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub leave: LeaveRequest,
    /// Account owning the employee profile.
    pub account_id: AccountId,
    /// Employee business key.
    pub employee_code: String,
    /// Employee display name.
    pub employee_name: String,
    /// Employee email.
    pub employee_email: String,
    /// Employee job title.
    pub designation: String,
    /// Employee profile image reference.
    pub profile_image: Option<String>,
    /// Department name, if assigned.
    pub department_name: Option<String>,
}

/// Validated input for a new leave request.
#[derive(Debug, Clone)]
pub struct CreateLeave {
    /// Requesting employee profile.
    pub employee_id: EmployeeId,
    /// Category.
    pub leave_type: LeaveType,
    /// First day off.
    pub start_date: NaiveDate,
    /// Last day off.
    pub end_date: NaiveDate,
    /// Justification (trimmed, non-empty).
    pub reason: String,
}

/// Equality filters for listing one employee's requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveFilter {
    /// Only this status.
    pub status: Option<LeaveStatus>,
    /// Only this category.
    pub leave_type: Option<LeaveType>,
}

impl LeaveFilter {
    /// Whether `leave` passes every set filter.
    pub fn matches(&self, leave: &LeaveRequest) -> bool {
        self.status.is_none_or(|s| s == leave.status)
            && self.leave_type.is_none_or(|t| t == leave.leave_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn leave(start: NaiveDate, end: NaiveDate) -> LeaveRequest {
        let now = Utc::now();
        LeaveRequest {
            id: LeaveId::new(),
            employee_id: EmployeeId::new(),
            leave_type: LeaveType::Annual,
            start_date: start,
            end_date: end,
            reason: "trip".into(),
            status: LeaveStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_duration_is_inclusive() {
        assert_eq!(leave(date(2024, 1, 10), date(2024, 1, 12)).duration_days(), 3);
        assert_eq!(leave(date(2024, 1, 10), date(2024, 1, 10)).duration_days(), 1);
        assert_eq!(duration_days(date(2024, 2, 28), date(2024, 3, 1)), 3);
    }

    #[test]
    fn test_overlap_edges() {
        let l = leave(date(2024, 1, 10), date(2024, 1, 12));
        assert!(l.overlaps(date(2024, 1, 12), date(2024, 1, 15)));
        assert!(l.overlaps(date(2024, 1, 1), date(2024, 1, 10)));
        assert!(!l.overlaps(date(2024, 1, 13), date(2024, 1, 15)));
        assert!(!l.overlaps(date(2024, 1, 1), date(2024, 1, 9)));
    }

    #[test]
    fn test_filter() {
        let l = leave(date(2024, 1, 10), date(2024, 1, 12));
        assert!(LeaveFilter::default().matches(&l));
        let f = LeaveFilter {
            status: Some(LeaveStatus::Approved),
            leave_type: None,
        };
        assert!(!f.matches(&l));
        let f = LeaveFilter {
            status: Some(LeaveStatus::Pending),
            leave_type: Some(LeaveType::Annual),
        };
        assert!(f.matches(&l));
    }

    #[test]
    fn test_view_serializes_flat() {
        let view = LeaveView {
            leave: leave(date(2024, 1, 10), date(2024, 1, 12)),
            account_id: AccountId::new(),
            employee_code: "EMP-1".into(),
            employee_name: "Alice".into(),
            employee_email: "alice@example.com".into(),
            designation: "Engineer".into(),
            profile_image: None,
            department_name: Some("R&D".into()),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["leaveType"], "Annual Leave");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["employeeCode"], "EMP-1");
        assert_eq!(json["startDate"], "2024-01-10");
    }
}
