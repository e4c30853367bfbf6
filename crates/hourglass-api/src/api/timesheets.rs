// Timesheets API routes
// Decision: Input validation happens here, before the data service — a write
// that reaches the service is always well-formed

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use hourglass_core::{EntryStatus, TimeEntry};

use super::common::{ErrorResponse, ListResponse};
use crate::auth::middleware::{AuthState, AuthUser, FromRef};
use crate::services::data::{DataService, NewTimeEntry};

/// App state for timesheet routes
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<DataService>,
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Query parameters for listing time entries
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListTimesheetsQuery {
    /// Filter by entry status (draft, submitted, approved)
    #[serde(default)]
    pub status: Option<String>,
}

/// Request to log time against a project
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTimeEntryRequest {
    pub client_id: Uuid,
    pub project_id: Uuid,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: String,
    #[serde(default = "default_billable")]
    pub billable: bool,
}

fn default_billable() -> bool {
    true
}

/// Create timesheet routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/timesheets", get(list_timesheets).post(create_timesheet))
        .with_state(state)
}

/// GET /v1/timesheets - List time entries
#[utoipa::path(
    get,
    path = "/v1/timesheets",
    params(
        ("status" = Option<String>, Query, description = "Filter by entry status")
    ),
    responses(
        (status = 200, description = "List of time entries", body = ListResponse<TimeEntry>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "timesheets"
)]
pub async fn list_timesheets(
    State(state): State<AppState>,
    _auth: AuthUser, // Require authentication
    Query(query): Query<ListTimesheetsQuery>,
) -> Json<ListResponse<TimeEntry>> {
    let status = query.status.as_deref().map(EntryStatus::from);
    let entries = state.data.list_entries(status).await;
    Json(ListResponse::new(entries))
}

/// POST /v1/timesheets - Log a time entry
#[utoipa::path(
    post,
    path = "/v1/timesheets",
    request_body = CreateTimeEntryRequest,
    responses(
        (status = 201, description = "Entry recorded", body = TimeEntry),
        (status = 400, description = "Invalid entry", body = ErrorResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "timesheets"
)]
pub async fn create_timesheet(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTimeEntryRequest>,
) -> Result<(StatusCode, Json<TimeEntry>), (StatusCode, Json<ErrorResponse>)> {
    if !(req.hours > 0.0 && req.hours.is_finite()) {
        return Err(ErrorResponse::new("Hours must be a positive number")
            .into_response(StatusCode::BAD_REQUEST));
    }
    if req.hours > 24.0 {
        return Err(ErrorResponse::new("Hours cannot exceed 24 for one day")
            .into_response(StatusCode::BAD_REQUEST));
    }
    if req.description.trim().is_empty() {
        return Err(ErrorResponse::new("Description is required")
            .into_response(StatusCode::BAD_REQUEST));
    }

    let entry = state
        .data
        .create_entry(NewTimeEntry {
            client_id: req.client_id,
            project_id: req.project_id,
            date: req.date,
            hours: req.hours,
            description: req.description.trim().to_string(),
            billable: req.billable,
        })
        .await;

    tracing::info!(
        user = %auth.email,
        project = %entry.project_id,
        hours = entry.hours,
        "time entry recorded"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}
