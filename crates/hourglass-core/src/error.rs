// Error taxonomy for the API layer
//
// Every failure in this system terminates in a structured response object or a
// logged degradation; nothing here is fatal to the process. User-visible text
// is always a plain message string — details stay in the logs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Missing or malformed input; recovered locally and surfaced as a
    /// user-facing message.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Corrupt session cookie; recovered by treating the session as absent.
    #[error("session decode failed: {0}")]
    Decode(#[from] crate::session::SessionDecodeError),

    /// Cookie storage failure; recovered by degrading to a logged-out state.
    #[error("session storage failed: {0}")]
    Storage(String),

    /// External service failure; recovered at the call site with fallback
    /// content.
    #[error("downstream call failed: {0}")]
    Downstream(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    pub fn downstream(msg: impl Into<String>) -> Self {
        CoreError::Downstream(msg.into())
    }
}
