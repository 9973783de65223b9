//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to look up one company.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupRequest {
    /// The company name typed by the user
    pub company_name: String,
}

/// Error body returned by the lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
