// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config, with compiled-in demo defaults
// Decision: The single demo account is the whole credential store — this is a
// placeholder for a real identity provider, not a user database

use std::time::Duration;
use uuid::Uuid;

use hourglass_core::session::SESSION_TTL;

/// The single account the demo credential store knows about.
#[derive(Debug, Clone)]
pub struct DemoAccount {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Default for DemoAccount {
    fn default() -> Self {
        Self {
            // Fixed identity so sessions survive server restarts
            id: Uuid::nil(),
            email: "demo@agency.test".to_string(),
            password: "demo-password".to_string(),
            name: "Demo User".to_string(),
        }
    }
}

/// Complete authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub account: DemoAccount,
    /// Session lifetime; also the cookie Max-Age.
    pub session_max_age: Duration,
    /// Whether session cookies carry the Secure attribute.
    pub secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            account: DemoAccount::default(),
            session_max_age: SESSION_TTL,
            secure_cookies: false,
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// `secure_cookies` tracks the deployment environment: true in production,
    /// false in development.
    pub fn from_env(production: bool) -> Self {
        let defaults = DemoAccount::default();

        let account = DemoAccount {
            id: std::env::var("AUTH_DEMO_USER_ID")
                .ok()
                .and_then(|s| Uuid::parse_str(&s).ok())
                .unwrap_or(defaults.id),
            email: std::env::var("AUTH_DEMO_EMAIL").unwrap_or(defaults.email),
            password: std::env::var("AUTH_DEMO_PASSWORD").unwrap_or(defaults.password),
            name: std::env::var("AUTH_DEMO_NAME").unwrap_or(defaults.name),
        };

        let session_max_age = std::env::var("AUTH_SESSION_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(SESSION_TTL);

        Self {
            account,
            session_max_age,
            secure_cookies: production,
        }
    }
}
