// Hourglass API server
// Decision: mock-first operation — every downstream collaborator (data backend,
// LLM endpoint) is optional, and the server degrades to deterministic mock data
// so the dashboard always has something to render.

mod api;
mod auth;
mod config;
mod services;

use anyhow::{Context, Result};
use api::ListResponse;
use axum::http::{header, HeaderValue, Method};
use axum::{extract::State, routing::get, Json, Router};
use hourglass_core::{
    Client, ClientHours, EntryStatus, Project, ProjectStatus, ReportSummary, SessionUser, TimeEntry,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::AppConfig;
use services::{DataService, LlmService};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment.clone(),
    })
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    environment: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::routes::login,
        auth::routes::logout,
        auth::routes::get_session,
        auth::routes::get_current_user,
        api::clients::list_clients,
        api::projects::list_projects,
        api::timesheets::list_timesheets,
        api::timesheets::create_timesheet,
        api::reports::get_summary,
        api::assistant::get_insights,
        api::client_errors::report_error,
    ),
    components(
        schemas(
            Client, Project, ProjectStatus,
            TimeEntry, EntryStatus,
            ReportSummary, ClientHours, SessionUser,
            ListResponse<Client>,
            ListResponse<Project>,
            ListResponse<TimeEntry>,
            auth::routes::LoginRequest, auth::routes::LoginResponse,
            auth::routes::LogoutResponse, auth::routes::SessionResponse,
            auth::routes::UserInfoResponse,
            api::projects::ListProjectsQuery,
            api::timesheets::ListTimesheetsQuery,
            api::timesheets::CreateTimeEntryRequest,
            api::reports::SummaryQuery,
            api::assistant::InsightsRequest, api::assistant::InsightsResponse,
            api::client_errors::ClientErrorReport, api::client_errors::ClientErrorAck,
            api::common::ErrorResponse,
        )
    ),
    tags(
        (name = "auth", description = "Session authentication endpoints"),
        (name = "clients", description = "Agency client endpoints"),
        (name = "projects", description = "Project endpoints"),
        (name = "timesheets", description = "Time entry endpoints"),
        (name = "reports", description = "Reporting endpoints"),
        (name = "assistant", description = "Timesheet assistant endpoints"),
        (name = "client-errors", description = "Browser error reporting")
    ),
    info(
        title = "Hourglass API",
        version = "0.1.0",
        description = "API for the agency timesheet dashboard",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments set variables directly
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // RUST_LOG wins when set; otherwise verbosity follows the environment
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(environment = %config.environment, "hourglass-api starting...");

    if config.backend.is_none() {
        tracing::info!("Data backend not configured, serving mock data");
    }
    if config.llm.is_none() {
        tracing::info!("LLM endpoint not configured, assistant serves canned answers");
    }

    // Auth state
    let auth_config = auth::AuthConfig::from_env(config.environment.is_production());
    tracing::info!(
        email = %auth_config.account.email,
        max_age_secs = auth_config.session_max_age.as_secs(),
        secure_cookies = auth_config.secure_cookies,
        "Demo authentication configured"
    );
    let auth_state = auth::AuthState::new(
        auth::SessionStore::new(&auth_config),
        Arc::new(auth::StaticCredentials::new(auth_config.account.clone())),
    );

    // Downstream services
    let data = Arc::new(DataService::new(config.backend.clone()));
    let llm = Arc::new(LlmService::new(config.llm.clone()));

    // Create module-specific states
    let clients_state = api::clients::AppState {
        data: data.clone(),
        auth: auth_state.clone(),
    };
    let projects_state = api::projects::AppState {
        data: data.clone(),
        auth: auth_state.clone(),
    };
    let timesheets_state = api::timesheets::AppState {
        data: data.clone(),
        auth: auth_state.clone(),
    };
    let reports_state = api::reports::AppState {
        data: data.clone(),
        auth: auth_state.clone(),
    };
    let assistant_state = api::assistant::AppState {
        llm,
        auth: auth_state.clone(),
    };
    let health_state = HealthState {
        environment: config.environment.to_string(),
    };

    // Load API prefix from environment (default: empty)
    // Example: API_PREFIX="/api" results in routes like /api/v1/timesheets
    let api_prefix = std::env::var("API_PREFIX").unwrap_or_default();
    if !api_prefix.is_empty() {
        tracing::info!(prefix = %api_prefix, "API prefix configured");
    }

    // Load CORS allowed origins from environment (optional)
    // Only needed when the dashboard is served from a different origin
    // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
    let cors_origins: Vec<HeaderValue> = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();

    if cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
    }

    // Build API routes (including auth)
    let api_routes = Router::new()
        .merge(api::clients::routes(clients_state))
        .merge(api::projects::routes(projects_state))
        .merge(api::timesheets::routes(timesheets_state))
        .merge(api::reports::routes(reports_state))
        .merge(api::assistant::routes(assistant_state))
        .merge(api::client_errors::routes())
        .merge(auth::routes(auth_state));

    // Build main router with health (not prefixed) and prefixed API routes
    let mut app = Router::new().route("/health", get(health).with_state(health_state));

    // Apply API prefix if configured (affects all API routes including auth)
    app = app.merge(build_router_with_prefix(api_routes, &api_prefix));

    // Add Swagger UI
    let app =
        app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Add CORS layer only if origins are configured
    let app = if !cors_origins.is_empty() {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::ORIGIN,
                    header::CACHE_CONTROL,
                ])
                .allow_credentials(true),
        )
    } else {
        app
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    // Start HTTP server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Build router with optional API prefix (extracted for testing)
fn build_router_with_prefix(api_routes: Router, api_prefix: &str) -> Router {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}
