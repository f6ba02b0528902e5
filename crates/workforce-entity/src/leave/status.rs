//! Leave status and the decision transitions between statuses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "leave_status")]
pub enum LeaveStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Granted. Terminal.
    Approved,
    /// Declined. Terminal.
    Rejected,
}

impl LeaveStatus {
    /// Whether this request still occupies its dates for overlap checks.
    pub fn blocks_dates(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Whether `decision` may be applied from this status.
    ///
    /// Re-applying the decision that produced the current status is allowed
    /// (idempotent); flipping a decided request is not.
    pub fn accepts(&self, decision: LeaveDecision) -> bool {
        *self == Self::Pending || *self == decision.target()
    }

    /// Return the status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = workforce_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(workforce_core::AppError::validation(format!(
                "Invalid leave status: '{s}'. Expected one of: Pending, Approved, Rejected"
            ))),
        }
    }
}

/// An admin decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaveDecision {
    /// Move to `Approved`.
    Approve,
    /// Move to `Rejected`.
    Reject,
}

impl LeaveDecision {
    /// Status the request ends in after this decision.
    pub fn target(&self) -> LeaveStatus {
        match self {
            Self::Approve => LeaveStatus::Approved,
            Self::Reject => LeaveStatus::Rejected,
        }
    }

    /// Verb used in log lines and messages.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_accepts_both_decisions() {
        assert!(LeaveStatus::Pending.accepts(LeaveDecision::Approve));
        assert!(LeaveStatus::Pending.accepts(LeaveDecision::Reject));
    }

    #[test]
    fn test_decided_requests_are_locked() {
        assert!(LeaveStatus::Approved.accepts(LeaveDecision::Approve));
        assert!(!LeaveStatus::Approved.accepts(LeaveDecision::Reject));
        assert!(LeaveStatus::Rejected.accepts(LeaveDecision::Reject));
        assert!(!LeaveStatus::Rejected.accepts(LeaveDecision::Approve));
    }

    #[test]
    fn test_rejected_does_not_block_dates() {
        assert!(LeaveStatus::Pending.blocks_dates());
        assert!(LeaveStatus::Approved.blocks_dates());
        assert!(!LeaveStatus::Rejected.blocks_dates());
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("APPROVED".parse::<LeaveStatus>().unwrap(), LeaveStatus::Approved);
        assert!("done".parse::<LeaveStatus>().is_err());
    }
}
