//! Department entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use workforce_core::types::DepartmentId;

/// An organisational unit employees are assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Storage key.
    pub id: DepartmentId,
    /// Unique department name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// When the department was created.
    pub created_at: DateTime<Utc>,
    /// When the department was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating or updating a department.
#[derive(Debug, Clone)]
pub struct DepartmentInput {
    /// Department name (trimmed).
    pub name: String,
    /// Description.
    pub description: Option<String>,
}
