use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::InternalError;
use crate::types::dto::common::ErrorResponse;

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid username or password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// Username already exists
    #[oai(status = 400)]
    DuplicateUsername(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    fn response(error: &str, message: impl Into<String>) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
        })
    }

    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials(Self::response(
            "invalid_credentials",
            "Invalid username or password",
        ))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        Self::InvalidToken(Self::response("invalid_token", "Invalid or malformed JWT"))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        Self::ExpiredToken(Self::response("expired_token", "JWT has expired"))
    }

    /// Create a DuplicateUsername error
    pub fn duplicate_username() -> Self {
        Self::DuplicateUsername(Self::response(
            "duplicate_username",
            "Username already exists",
        ))
    }

    fn internal_server_error() -> Self {
        Self::InternalError(Self::response(
            "internal_error",
            "An internal error occurred",
        ))
    }

    /// Convert InternalError to AuthError
    ///
    /// This is the explicit conversion point from internal errors to API
    /// errors. Internal error details are logged but not exposed to clients.
    pub fn from_internal(err: InternalError) -> Self {
        match &err {
            InternalError::InvalidCredentials => {
                tracing::debug!("invalid credentials attempt");
                Self::invalid_credentials()
            }
            InternalError::DuplicateUsername(username) => {
                tracing::warn!("duplicate username attempt: {}", username);
                Self::duplicate_username()
            }
            _ => {
                tracing::error!("internal error in auth operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            Self::InvalidCredentials(json)
            | Self::InvalidToken(json)
            | Self::ExpiredToken(json)
            | Self::DuplicateUsername(json)
            | Self::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
