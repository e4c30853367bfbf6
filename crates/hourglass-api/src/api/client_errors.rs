// Client error reporting routes
// Decision: the browser posts uncaught errors here and we surface them in the
// server log, where the rest of the operational story already lives. No
// storage, no dedup; the log aggregator owns retention. Unauthenticated on
// purpose: errors on the login page matter too.

use axum::{http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::ErrorResponse;

/// Error report from the browser
#[derive(Debug, Deserialize, ToSchema)]
pub struct ClientErrorReport {
    #[serde(default)]
    pub message: String,
    pub stack: Option<String>,
    /// Originating page or component
    pub source: Option<String>,
    pub context: Option<serde_json::Value>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientErrorAck {
    pub success: bool,
}

/// Create client error routes
pub fn routes() -> Router {
    Router::new().route("/v1/client-errors", post(report_error))
}

/// POST /v1/client-errors - Record a browser-side error
#[utoipa::path(
    post,
    path = "/v1/client-errors",
    request_body = ClientErrorReport,
    responses(
        (status = 200, description = "Report recorded", body = ClientErrorAck),
        (status = 400, description = "Empty message", body = ErrorResponse)
    ),
    tag = "client-errors"
)]
pub async fn report_error(
    Json(report): Json<ClientErrorReport>,
) -> Result<Json<ClientErrorAck>, (StatusCode, Json<ErrorResponse>)> {
    if report.message.trim().is_empty() {
        return Err(
            ErrorResponse::new("Error message is required").into_response(StatusCode::BAD_REQUEST)
        );
    }

    tracing::error!(
        message = %report.message,
        source = report.source.as_deref().unwrap_or("unknown"),
        timestamp = report.timestamp.as_deref().unwrap_or(""),
        stack = report.stack.as_deref().unwrap_or(""),
        context = %report
            .context
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_default(),
        "client-side error reported"
    );

    Ok(Json(ClientErrorAck { success: true }))
}
