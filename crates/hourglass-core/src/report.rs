// Reporting domain types
//
// Summaries are computed from time entries on request; nothing here is stored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::timesheet::TimeEntry;

/// Hours logged against one client within a reporting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ClientHours {
    pub client_id: Uuid,
    pub hours: f64,
    pub billable_hours: f64,
}

/// Aggregated view over a set of time entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReportSummary {
    /// Human-readable period label, e.g. "2025-W23" or "June 2025".
    pub period: String,
    pub total_hours: f64,
    pub billable_hours: f64,
    /// billable_hours / total_hours, 0.0 when no hours are logged.
    pub utilization: f64,
    pub by_client: Vec<ClientHours>,
}

impl ReportSummary {
    /// Aggregate entries into a summary for the given period label.
    pub fn from_entries(period: impl Into<String>, entries: &[TimeEntry]) -> Self {
        let mut by_client: Vec<ClientHours> = Vec::new();
        let mut total_hours = 0.0;
        let mut billable_hours = 0.0;

        for entry in entries {
            total_hours += entry.hours;
            let billable = if entry.billable { entry.hours } else { 0.0 };
            billable_hours += billable;

            match by_client.iter_mut().find(|c| c.client_id == entry.client_id) {
                Some(bucket) => {
                    bucket.hours += entry.hours;
                    bucket.billable_hours += billable;
                }
                None => by_client.push(ClientHours {
                    client_id: entry.client_id,
                    hours: entry.hours,
                    billable_hours: billable,
                }),
            }
        }

        let utilization = if total_hours > 0.0 {
            billable_hours / total_hours
        } else {
            0.0
        };

        Self {
            period: period.into(),
            total_hours,
            billable_hours,
            utilization,
            by_client,
        }
    }
}
