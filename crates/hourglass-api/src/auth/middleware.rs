// Authentication extractor for protected routes
// Decision: Routes declare an AuthUser parameter instead of calling the session
// store themselves — the extractor is the only read path outside auth/routes

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use hourglass_core::session::{Session, SESSION_COOKIE};

use super::credentials::CredentialStore;
use super::session::SessionStore;

/// Authentication error
#[derive(Debug, Clone, Serialize)]
pub struct AuthError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl AuthError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Authenticated user context extracted from the session cookie.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<Session> for AuthUser {
    fn from(session: Session) -> Self {
        Self {
            id: session.user.id,
            email: session.user.email,
            name: session.user.name,
        }
    }
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub sessions: SessionStore,
    pub credentials: Arc<dyn CredentialStore>,
}

impl AuthState {
    pub fn new(sessions: SessionStore, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            sessions,
            credentials,
        }
    }
}

/// Helper trait for extracting AuthState from application state
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

impl FromRef<AuthState> for AuthState {
    fn from_ref(input: &AuthState) -> Self {
        input.clone()
    }
}

/// Extractor for authenticated user.
/// This is required - returns 401 if not authenticated.
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_auth_user(parts)
    }
}

/// Extract the authenticated user from the request's session cookie.
///
/// Extractors see request headers only, so an expired or corrupt cookie is
/// rejected here but cleared later, by the session endpoint or logout.
fn extract_auth_user(parts: &mut Parts) -> Result<AuthUser, AuthError> {
    let jar = CookieJar::from_headers(&parts.headers);

    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| AuthError::unauthorized("Authentication required"))?;

    let session = Session::from_cookie_value(cookie.value()).map_err(|err| {
        tracing::debug!(error = %err, "rejecting request with undecodable session cookie");
        AuthError::unauthorized("Authentication required")
    })?;

    if session.is_expired(Utc::now()) {
        return Err(AuthError::unauthorized("Session expired"));
    }

    Ok(AuthUser::from(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use hourglass_core::session::SessionUser;
    use std::time::Duration;

    fn parts_with_cookie(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/v1/timesheets");
        if let Some(value) = value {
            builder = builder.header("cookie", format!("{SESSION_COOKIE}={value}"));
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    fn valid_cookie_value() -> String {
        let session = Session::new(
            SessionUser {
                id: Uuid::nil(),
                email: "demo@agency.test".to_string(),
                name: "Demo User".to_string(),
            },
            Duration::from_secs(3600),
        );
        session.to_cookie_value().unwrap()
    }

    #[test]
    fn test_extract_with_valid_session() {
        let value = valid_cookie_value();
        let mut parts = parts_with_cookie(Some(&value));
        let user = extract_auth_user(&mut parts).unwrap();
        assert_eq!(user.email, "demo@agency.test");
    }

    #[test]
    fn test_extract_without_cookie() {
        let mut parts = parts_with_cookie(None);
        let err = extract_auth_user(&mut parts).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_extract_with_corrupt_cookie() {
        let mut parts = parts_with_cookie(Some("garbage"));
        let err = extract_auth_user(&mut parts).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error, "Authentication required");
    }

    #[test]
    fn test_extract_with_expired_session() {
        let mut session = Session::new(
            SessionUser {
                id: Uuid::nil(),
                email: "demo@agency.test".to_string(),
                name: "Demo User".to_string(),
            },
            Duration::from_secs(3600),
        );
        session.expires = Utc::now() - chrono::Duration::minutes(5);
        let value = session.to_cookie_value().unwrap();

        let mut parts = parts_with_cookie(Some(&value));
        let err = extract_auth_user(&mut parts).unwrap_err();
        assert_eq!(err.error, "Session expired");
    }

    #[test]
    fn test_auth_error_shape() {
        let error = AuthError::unauthorized("Authentication required");
        assert_eq!(error.status, StatusCode::UNAUTHORIZED);
        assert_eq!(error.error, "Authentication required");
    }
}
