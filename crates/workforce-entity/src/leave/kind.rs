//! Leave type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a leave request. Stored and serialized with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "leave_type")]
pub enum LeaveType {
    /// Illness.
    #[serde(rename = "Sick Leave")]
    #[sqlx(rename = "Sick Leave")]
    Sick,
    /// Short personal absence.
    #[serde(rename = "Casual Leave")]
    #[sqlx(rename = "Casual Leave")]
    Casual,
    /// Planned vacation.
    #[serde(rename = "Annual Leave")]
    #[sqlx(rename = "Annual Leave")]
    Annual,
}

impl LeaveType {
    /// All leave types, in display order.
    pub const ALL: [LeaveType; 3] = [Self::Sick, Self::Casual, Self::Annual];

    /// Return the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sick => "Sick Leave",
            Self::Casual => "Casual Leave",
            Self::Annual => "Annual Leave",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LeaveType {
    type Err = workforce_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                workforce_core::AppError::validation(format!(
                    "Invalid leave type: '{s}'. Expected one of: Sick Leave, Casual Leave, Annual Leave"
                ))
            })
    }
}
