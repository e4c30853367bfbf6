// Authentication module
//
// The only entry point other parts of the server use for auth. Submodules:
// - config: demo credential tuple and session settings from the environment
// - credentials: the CredentialStore seam (a real IdP slots in here)
// - session: the cookie-backed session lifecycle (create/read/destroy)
// - routes: login/logout/session HTTP handlers
// - middleware: the AuthUser extractor for protected routes

pub mod config;
pub mod credentials;
pub mod middleware;
pub mod routes;
pub mod session;

pub use config::AuthConfig;
pub use credentials::StaticCredentials;
pub use middleware::{AuthState, AuthUser, FromRef};
pub use routes::routes;
pub use session::SessionStore;
