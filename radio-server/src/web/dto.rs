//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query parameters for the station listing.
#[derive(Debug, Default, Deserialize)]
pub struct StationsQuery {
    /// Requested number of stations; clamped by the router
    pub limit: Option<i64>,
}

/// Body of `GET /api/`.
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

/// Result of the (stubbed) stream validation.
#[derive(Debug, Serialize)]
pub struct ValidateStationResponse {
    pub valid: bool,
    pub status: &'static str,
    /// RFC 3339 UTC timestamp
    pub last_checked: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
