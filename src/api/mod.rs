//! HTTP API: the lookup page, the lookup endpoint, and health.

mod routes;
mod types;

pub use routes::{serve, AppState};
pub use types::{ErrorResponse, HealthResponse, LookupRequest};
