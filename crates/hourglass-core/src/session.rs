// Session domain type and cookie codec
//
// The session is the only persisted entity in the system and it is persisted
// client-side: the whole record is JSON-encoded into a single cookie value.
// Decision: no signing or encryption — this codec carries demo semantics only.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "mock_session";

/// Session TTL: 7 days from creation.
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// Error produced when a cookie value cannot be converted to/from a session.
///
/// Callers must treat a decode failure exactly like a missing session.
#[derive(Debug, Error)]
pub enum SessionDecodeError {
    #[error("invalid session encoding: {0}")]
    Syntax(#[from] serde_json::Error),
}

/// The identity carried by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// An authenticated client's session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Session {
    pub user: SessionUser,
    /// Absolute expiry timestamp, RFC 3339 on the wire.
    pub expires: DateTime<Utc>,
}

impl Session {
    /// Create a session expiring `ttl` from now.
    pub fn new(user: SessionUser, ttl: Duration) -> Self {
        let ttl = ChronoDuration::from_std(ttl).unwrap_or_else(|_| ChronoDuration::days(7));
        Self {
            user,
            expires: Utc::now() + ttl,
        }
    }

    /// A session is valid iff `expires` is strictly in the future.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }

    /// Canonical JSON encoding used as the cookie value.
    pub fn to_cookie_value(&self) -> Result<String, SessionDecodeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a raw cookie value back into a session.
    pub fn from_cookie_value(raw: &str) -> Result<Self, SessionDecodeError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_user() -> SessionUser {
        SessionUser {
            id: Uuid::nil(),
            email: "demo@agency.test".to_string(),
            name: "Demo User".to_string(),
        }
    }

    #[test]
    fn test_cookie_round_trip() {
        let session = Session::new(demo_user(), SESSION_TTL);
        let raw = session.to_cookie_value().unwrap();
        let decoded = Session::from_cookie_value(&raw).unwrap();
        assert_eq!(decoded.user, session.user);
        assert_eq!(decoded.expires, session.expires);
    }

    #[test]
    fn test_cookie_wire_shape() {
        let session = Session::new(demo_user(), SESSION_TTL);
        let value: serde_json::Value =
            serde_json::from_str(&session.to_cookie_value().unwrap()).unwrap();
        assert!(value["user"]["id"].is_string());
        assert_eq!(value["user"]["email"], "demo@agency.test");
        assert_eq!(value["user"]["name"], "Demo User");
        // expires is an RFC 3339 string, not a numeric timestamp
        assert!(value["expires"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(Session::from_cookie_value("not json at all").is_err());
        assert!(Session::from_cookie_value("").is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(Session::from_cookie_value(r#"{"user": "nope"}"#).is_err());
        assert!(Session::from_cookie_value(r#"{"expires": "2020-01-01T00:00:00Z"}"#).is_err());
    }

    #[test]
    fn test_expiry_is_strict() {
        let mut session = Session::new(demo_user(), SESSION_TTL);
        let now = Utc::now();

        session.expires = now + ChronoDuration::seconds(1);
        assert!(!session.is_expired(now));

        // expires == now counts as expired
        session.expires = now;
        assert!(session.is_expired(now));

        session.expires = now - ChronoDuration::seconds(1);
        assert!(session.is_expired(now));
    }

    #[test]
    fn test_session_ttl_is_seven_days() {
        let before = Utc::now() + ChronoDuration::days(7) - ChronoDuration::seconds(5);
        let session = Session::new(demo_user(), SESSION_TTL);
        let after = Utc::now() + ChronoDuration::days(7) + ChronoDuration::seconds(5);
        assert!(session.expires > before && session.expires < after);
    }
}
