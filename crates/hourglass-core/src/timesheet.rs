// Timesheet entry domain types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Lifecycle status of a time entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Draft,
    Submitted,
    Approved,
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Draft => write!(f, "draft"),
            EntryStatus::Submitted => write!(f, "submitted"),
            EntryStatus::Approved => write!(f, "approved"),
        }
    }
}

impl From<&str> for EntryStatus {
    fn from(s: &str) -> Self {
        match s {
            "submitted" => EntryStatus::Submitted,
            "approved" => EntryStatus::Approved,
            _ => EntryStatus::Draft,
        }
    }
}

/// One logged unit of work on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TimeEntry {
    pub id: Uuid,
    pub client_id: Uuid,
    pub project_id: Uuid,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: String,
    pub billable: bool,
    pub status: EntryStatus,
    pub created_at: DateTime<Utc>,
}
