// Authentication HTTP routes
// Decision: /v1/auth/* prefix, consistent with the other API routes
// Decision: Handlers return the facade's {success, error?, redirect_to?} body
// shape on every path; status codes follow HTTP convention on top of it

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hourglass_core::session::SessionUser;

use super::middleware::{AuthState, AuthUser};

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Result of a login attempt.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl LoginResponse {
    fn failure(error: &str) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            redirect_to: None,
        }
    }
}

/// Result of a logout.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Current session state.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

/// Current user info (requires authentication).
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfoResponse {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/logout", post(logout))
        .route("/v1/auth/session", get(get_session))
        .route("/v1/auth/me", get(get_current_user))
        .with_state(state)
}

/// POST /v1/auth/login - Login with email and password
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, session cookie set", body = LoginResponse),
        (status = 400, description = "Missing email or password", body = LoginResponse),
        (status = 401, description = "Credentials do not match", body = LoginResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, CookieJar, Json<LoginResponse>) {
    if req.email.is_empty() || req.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            jar,
            Json(LoginResponse::failure("Email and password are required")),
        );
    }

    let user = match state.credentials.validate(&req.email, &req.password) {
        Some(user) => user,
        None => {
            tracing::info!(email = %req.email, "login rejected");
            return (
                StatusCode::UNAUTHORIZED,
                jar,
                Json(LoginResponse::failure("Invalid email or password")),
            );
        }
    };

    let jar = state.sessions.create(jar, user.clone());
    tracing::info!(user = %user.email, "login succeeded");

    (
        StatusCode::OK,
        jar,
        Json(LoginResponse {
            success: true,
            error: None,
            redirect_to: Some("/dashboard".to_string()),
        }),
    )
}

/// POST /v1/auth/logout - Delete the session cookie
///
/// Idempotent: logging out without a session still succeeds.
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 200, description = "Session cleared", body = LogoutResponse)
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let jar = state.sessions.destroy(jar);
    tracing::debug!("session destroyed");
    (
        jar,
        Json(LogoutResponse {
            success: true,
            error: None,
        }),
    )
}

/// GET /v1/auth/session - Read the current session
///
/// Performs the lazy-expiry read: an expired or corrupt cookie is cleared via
/// the returned jar and reported as unauthenticated. Never fails.
#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Current session state", body = SessionResponse)
    ),
    tag = "auth"
)]
pub async fn get_session(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    let (jar, session) = state.sessions.read(jar);

    let response = match session {
        Some(session) => SessionResponse {
            authenticated: true,
            expires: Some(session.expires),
            user: Some(session.user),
        },
        None => SessionResponse {
            authenticated: false,
            user: None,
            expires: None,
        },
    };

    (jar, Json(response))
}

/// GET /v1/auth/me - Get current user info
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Authenticated user", body = UserInfoResponse),
        (status = 401, description = "Not authenticated")
    ),
    tag = "auth"
)]
pub async fn get_current_user(user: AuthUser) -> Json<UserInfoResponse> {
    Json(UserInfoResponse {
        id: user.id.to_string(),
        email: user.email,
        name: user.name,
    })
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
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let config = AuthConfig::default();
        let state = AuthState::new(
            SessionStore::new(&config),
            Arc::new(StaticCredentials::new(config.account.clone())),
        );
        routes(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn login_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Log in with the demo credentials and return the session cookie value.
    async fn login_cookie(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(login_request(json!({
                "email": "demo@agency.test",
                "password": "demo-password"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login should set a cookie")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_login_success_sets_cookie_and_redirects() {
        let app = test_router();
        let response = app
            .oneshot(login_request(json!({
                "email": "demo@agency.test",
                "password": "demo-password"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with("mock_session="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Max-Age=604800"));
        // Development mode: no Secure attribute
        assert!(!set_cookie.contains("Secure"));

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["redirect_to"], "/dashboard");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = test_router();
        let response = app
            .oneshot(login_request(json!({
                "email": "demo@agency.test",
                "password": "wrong"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), 401);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_empty_password() {
        let app = test_router();
        let response = app
            .oneshot(login_request(json!({
                "email": "demo@agency.test",
                "password": ""
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Email and password are required");
    }

    #[tokio::test]
    async fn test_login_then_session_is_authenticated() {
        let app = test_router();
        let cookie = login_cookie(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/auth/session")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = body_json(response).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["user"]["email"], "demo@agency.test");
        assert!(body["expires"].is_string());
    }

    #[tokio::test]
    async fn test_session_without_cookie() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/auth/session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = body_json(response).await;
        assert_eq!(body["authenticated"], false);
        assert!(body.get("user").is_none());
    }

    #[tokio::test]
    async fn test_session_with_corrupt_cookie() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/auth/session")
                    .header(header::COOKIE, "mock_session=not-json-at-all")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Corrupt cookie is not an error, just an absent session
        assert_eq!(response.status(), 200);
        let body_cleared = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().contains("Max-Age=0"))
            .unwrap_or(false);
        assert!(body_cleared, "corrupt cookie should be cleared");
    }

    #[tokio::test]
    async fn test_expired_session_is_cleared() {
        use hourglass_core::session::{Session, SessionUser};

        let mut session = Session::new(
            SessionUser {
                id: uuid::Uuid::nil(),
                email: "demo@agency.test".to_string(),
                name: "Demo User".to_string(),
            },
            std::time::Duration::from_secs(60),
        );
        session.expires = Utc::now() - chrono::Duration::days(1);
        let cookie = format!("mock_session={}", session.to_cookie_value().unwrap());

        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/auth/session")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let removal = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(removal.contains("Max-Age=0"), "expired cookie should be cleared");

        let body = body_json(response).await;
        assert_eq!(body["authenticated"], false);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let app = test_router();

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/v1/auth/logout")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), 200);
            let body = body_json(response).await;
            assert_eq!(body["success"], true);
        }
    }

    #[tokio::test]
    async fn test_logout_then_session_absent() {
        let app = test_router();
        let cookie = login_cookie(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/auth/logout")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let removal = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(removal.contains("Max-Age=0"));

        // The client dropped its cookie; the session reads as absent
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/auth/session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["authenticated"], false);
    }

    #[tokio::test]
    async fn test_me_requires_authentication() {
        let app = test_router();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/v1/auth/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 401);

        let cookie = login_cookie(&app).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/auth/me")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body = body_json(response).await;
        assert_eq!(body["email"], "demo@agency.test");
        assert_eq!(body["name"], "Demo User");
    }
}
