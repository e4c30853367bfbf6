// Reports API routes

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use hourglass_core::ReportSummary;

use crate::auth::middleware::{AuthState, AuthUser, FromRef};
use crate::services::DataService;

/// App state for report routes
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

/// Query parameters for the summary report
#[derive(Debug, Deserialize, ToSchema)]
pub struct SummaryQuery {
    /// Period label included in the report, e.g. "2025-W23"
    #[serde(default = "default_period")]
    pub period: String,
}

fn default_period() -> String {
    "all-time".to_string()
}

/// Create report routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/reports/summary", get(get_summary))
        .with_state(state)
}

/// GET /v1/reports/summary - Aggregate hours report
#[utoipa::path(
    get,
    path = "/v1/reports/summary",
    params(
        ("period" = Option<String>, Query, description = "Period label for the report")
    ),
    responses(
        (status = 200, description = "Aggregated report", body = ReportSummary),
        (status = 401, description = "Unauthorized")
    ),
    tag = "reports"
)]
pub async fn get_summary(
    State(state): State<AppState>,
    _auth: AuthUser, // Require authentication
    Query(query): Query<SummaryQuery>,
) -> Json<ReportSummary> {
    let summary = state.data.summary(&query.period).await;
    Json(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::AuthConfig;
    use crate::auth::credentials::StaticCredentials;
    use crate::auth::session::SessionStore;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let config = AuthConfig::default();
        let auth = AuthState::new(
            SessionStore::new(&config),
            Arc::new(StaticCredentials::new(config.account.clone())),
        );
        routes(AppState {
            data: Arc::new(DataService::new(None)),
            auth,
        })
    }

    fn session_cookie() -> String {
        use hourglass_core::session::{Session, SessionUser, SESSION_TTL};
        let session = Session::new(
            SessionUser {
                id: uuid::Uuid::nil(),
                email: "demo@agency.test".to_string(),
                name: "Demo User".to_string(),
            },
            SESSION_TTL,
        );
        format!("mock_session={}", session.to_cookie_value().unwrap())
    }

    #[tokio::test]
    async fn test_summary_over_mock_entries() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/v1/reports/summary?period=2025-W23")
                    .header(header::COOKIE, session_cookie())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["period"], "2025-W23");
        assert_eq!(body["total_hours"], 13.5);
        assert_eq!(body["billable_hours"], 10.5);
    }

    #[tokio::test]
    async fn test_summary_default_period() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/v1/reports/summary")
                    .header(header::COOKIE, session_cookie())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["period"], "all-time");
    }

    #[tokio::test]
    async fn test_summary_requires_auth() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/v1/reports/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 401);
    }
}
