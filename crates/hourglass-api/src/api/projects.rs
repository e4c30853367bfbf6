// Projects API routes

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use hourglass_core::Project;

use super::common::ListResponse;
use crate::auth::middleware::{AuthState, AuthUser, FromRef};
use crate::services::DataService;

/// App state for project routes
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

/// Query parameters for listing projects
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListProjectsQuery {
    /// Restrict to projects of one client
    #[serde(default)]
    pub client_id: Option<Uuid>,
}

/// Create project routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/projects", get(list_projects))
        .with_state(state)
}

/// GET /v1/projects - List projects
#[utoipa::path(
    get,
    path = "/v1/projects",
    params(
        ("client_id" = Option<Uuid>, Query, description = "Filter by client")
    ),
    responses(
        (status = 200, description = "List of projects", body = ListResponse<Project>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
    _auth: AuthUser, // Require authentication
    Query(query): Query<ListProjectsQuery>,
) -> Json<ListResponse<Project>> {
    let projects = state.data.list_projects(query.client_id).await;
    Json(ListResponse::new(projects))
}
