// Clients API routes

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use hourglass_core::Client;

use super::common::ListResponse;
use crate::auth::middleware::{AuthState, AuthUser, FromRef};
use crate::services::DataService;

/// App state for client routes
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

/// Create client routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/clients", get(list_clients))
        .with_state(state)
}

/// GET /v1/clients - List agency clients
#[utoipa::path(
    get,
    path = "/v1/clients",
    responses(
        (status = 200, description = "List of clients", body = ListResponse<Client>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "clients"
)]
pub async fn list_clients(
    State(state): State<AppState>,
    _auth: AuthUser, // Require authentication
) -> Json<ListResponse<Client>> {
    let clients = state.data.list_clients().await;
    Json(ListResponse::new(clients))
}
