// Hourglass domain types
//
// This crate holds the DB-agnostic entity types shared across the workspace:
// - Session and its cookie codec (the only persisted entity; it lives in the
//   client's cookie jar, not in server storage)
// - Timesheet domain entities (Client, Project, TimeEntry, ReportSummary)
// - The error taxonomy used by the API layer
//
// Key design decisions:
// - The session cookie value is plain JSON. This is demo-grade by design: a
//   production deployment needs signed or encrypted tokens before this codec
//   can be trusted with anything real.
// - utoipa derives are feature-gated so non-API consumers don't pull the
//   OpenAPI stack.

pub mod client;
pub mod error;
pub mod project;
pub mod report;
pub mod session;
pub mod timesheet;

// Re-exports for convenience
pub use client::Client;
pub use error::CoreError;
pub use project::{Project, ProjectStatus};
pub use report::{ClientHours, ReportSummary};
pub use session::{Session, SessionDecodeError, SessionUser, SESSION_COOKIE, SESSION_TTL};
pub use timesheet::{EntryStatus, TimeEntry};
