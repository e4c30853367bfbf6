// Session lifecycle over the request's cookie jar
// Decision: The session's only storage slot is the client cookie, so every
// operation takes and returns a CookieJar — there is no server-side state

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use std::time::Duration;

use hourglass_core::session::{Session, SessionUser, SESSION_COOKIE};

use super::config::AuthConfig;

/// Owns the `mock_session` cookie slot.
///
/// No operation here surfaces an error to its caller: a failure to encode or
/// decode is logged and degrades to the logged-out state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    max_age: Duration,
    secure: bool,
}

impl SessionStore {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            max_age: config.session_max_age,
            secure: config.secure_cookies,
        }
    }

    /// Create a session for `user` and write it into the jar.
    ///
    /// The new session replaces any existing one. On encode failure the jar is
    /// returned unchanged, which reads back as logged-out.
    pub fn create(&self, jar: CookieJar, user: SessionUser) -> CookieJar {
        let session = Session::new(user, self.max_age);
        let value = match session.to_cookie_value() {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(error = %err, "failed to encode session cookie");
                return jar;
            }
        };

        let cookie = Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(self.max_age.as_secs() as i64))
            .build();

        jar.add(cookie)
    }

    /// Read the current session, lazily clearing it when expired or corrupt.
    ///
    /// The returned jar must be sent back to the client so the removal of a
    /// dead cookie actually takes effect.
    pub fn read(&self, jar: CookieJar) -> (CookieJar, Option<Session>) {
        let raw = match jar.get(SESSION_COOKIE) {
            Some(cookie) => cookie.value().to_string(),
            None => return (jar, None),
        };

        let session = match Session::from_cookie_value(&raw) {
            Ok(session) => session,
            Err(err) => {
                // Corrupt cookie reads as absent; clear it so the client
                // stops sending it
                tracing::debug!(error = %err, "discarding undecodable session cookie");
                return (self.destroy(jar), None);
            }
        };

        if session.is_expired(Utc::now()) {
            tracing::debug!(user = %session.user.email, "discarding expired session");
            return (self.destroy(jar), None);
        }

        (jar, Some(session))
    }

    /// Delete the session cookie unconditionally. Idempotent.
    pub fn destroy(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }
}
