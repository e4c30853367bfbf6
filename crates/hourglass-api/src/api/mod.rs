// API module

pub mod assistant;
pub mod client_errors;
pub mod clients;
pub mod common;
pub mod projects;
pub mod reports;
pub mod timesheets;

pub use common::{ErrorResponse, ListResponse};
