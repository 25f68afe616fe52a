use poem_openapi::Object;

/// Response model for the health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Name of the service
    pub service: String,

    /// Version of the running build
    pub version: String,

    /// "healthy" when the database answers a ping, "degraded" otherwise
    pub status: String,

    /// Whether the complaint database is reachable
    pub database: bool,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Error response body shared by all endpoints
///
/// `error` is a stable machine-readable code: `invalid_transition`,
/// `missing_assignment`, `unknown_area`, `terminal_state`,
/// `concurrent_modification`,
/// `record_not_found`, `unauthorized`, `unauthenticated`, the auth codes
/// (`invalid_credentials`, `invalid_token`, `expired_token`,
/// `duplicate_username`) or `internal_error`. The HTTP status carries the
/// failure class; clients branch on `error` for the specific cause.
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,

    /// Human-readable error message
    pub message: String,
}
