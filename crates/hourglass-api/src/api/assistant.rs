// Assistant API routes
// Decision: A model outage degrades to canned guidance — the page always gets
// an answer, and the body says which kind it got

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::common::ErrorResponse;
use crate::auth::middleware::{AuthState, AuthUser, FromRef};
use crate::services::LlmService;

/// Served when the completion endpoint is unconfigured or unavailable.
const CANNED_ANSWER: &str = "Based on recent entries, utilization is healthy but \
a share of logged hours is non-billable. Review draft entries older than a week \
and confirm project budgets before month end.";

/// App state for assistant routes
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<LlmService>,
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Question for the assistant
#[derive(Debug, Deserialize, ToSchema)]
pub struct InsightsRequest {
    #[serde(default)]
    pub question: String,
}

/// Assistant answer
#[derive(Debug, Serialize, ToSchema)]
pub struct InsightsResponse {
    pub answer: String,
    /// "model" when the completion endpoint answered, "canned" on fallback
    pub source: String,
}

/// Create assistant routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/assistant/insights", post(get_insights))
        .with_state(state)
}

/// POST /v1/assistant/insights - Ask the timesheet assistant
#[utoipa::path(
    post,
    path = "/v1/assistant/insights",
    request_body = InsightsRequest,
    responses(
        (status = 200, description = "Assistant answer", body = InsightsResponse),
        (status = 400, description = "Empty question", body = ErrorResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "assistant"
)]
pub async fn get_insights(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<InsightsRequest>,
) -> Result<Json<InsightsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(
            ErrorResponse::new("Question is required").into_response(StatusCode::BAD_REQUEST)
        );
    }

    let response = match state.llm.complete(question).await {
        Ok(answer) => InsightsResponse {
            answer,
            source: "model".to_string(),
        },
        Err(err) => {
            tracing::warn!(user = %auth.email, error = %err, "serving canned assistant answer");
            InsightsResponse {
                answer: CANNED_ANSWER.to_string(),
                source: "canned".to_string(),
            }
        }
    };

    Ok(Json(response))
}
