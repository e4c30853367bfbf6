// Credential validation
// Decision: One narrow trait so a real identity provider can replace the demo
// store without touching the routes or the session store

use hourglass_core::session::SessionUser;

use super::config::DemoAccount;

/// Validates a credential pair and yields the identity it belongs to.
pub trait CredentialStore: Send + Sync {
    /// Returns the matching identity iff both fields match exactly
    /// (case-sensitive). No hashing, no rate limiting, no lockout.
    fn validate(&self, email: &str, password: &str) -> Option<SessionUser>;
}

/// The demo store: a single configured account compared by equality.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    account: DemoAccount,
}

impl StaticCredentials {
    pub fn new(account: DemoAccount) -> Self {
        Self { account }
    }
}

impl CredentialStore for StaticCredentials {
    fn validate(&self, email: &str, password: &str) -> Option<SessionUser> {
        if email == self.account.email && password == self.account.password {
            Some(SessionUser {
                id: self.account.id,
                email: self.account.email.clone(),
                name: self.account.name.clone(),
            })
        } else {
            None
        }
    }
}
