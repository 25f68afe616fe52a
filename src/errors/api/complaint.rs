use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::InternalError;
use crate::errors::workflow::WorkflowError;
use crate::types::dto::common::ErrorResponse;

/// Complaint endpoint error responses
///
/// The single conversion point from internal/workflow errors to HTTP
/// statuses. Internal details are logged, never sent to clients.
#[derive(ApiResponse, Debug)]
pub enum ComplaintApiError {
    /// Invalid transition or missing required assignment
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Missing or invalid bearer token
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorResponse>),

    /// Actor's role does not permit the action
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Complaint not found
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Terminal state or concurrent modification conflict
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ComplaintApiError {
    fn response(error: &str, message: impl Into<String>) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
        })
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::BadRequest(Self::response("invalid_transition", message))
    }

    pub fn missing_assignment() -> Self {
        Self::BadRequest(Self::response(
            "missing_assignment",
            "Transition requires a non-empty assigned area",
        ))
    }

    pub fn unknown_area(area: &str) -> Self {
        Self::BadRequest(Self::response(
            "unknown_area",
            format!("Area is not in the catalog: {}", area),
        ))
    }

    pub fn unauthenticated() -> Self {
        Self::Unauthenticated(Self::response(
            "unauthenticated",
            "A valid bearer token is required",
        ))
    }

    pub fn forbidden() -> Self {
        Self::Forbidden(Self::response(
            "unauthorized",
            "You are not allowed to perform this action",
        ))
    }

    pub fn not_found(id: &str) -> Self {
        Self::NotFound(Self::response(
            "record_not_found",
            format!("Complaint not found: {}", id),
        ))
    }

    pub fn terminal_state(message: impl Into<String>) -> Self {
        Self::Conflict(Self::response("terminal_state", message))
    }

    pub fn concurrent_modification() -> Self {
        Self::Conflict(Self::response(
            "concurrent_modification",
            "The complaint was modified concurrently; please retry",
        ))
    }

    fn internal_server_error() -> Self {
        Self::InternalError(Self::response(
            "internal_error",
            "An internal error occurred",
        ))
    }

    /// Convert an InternalError into the API error for complaint endpoints
    pub fn from_internal(err: InternalError) -> Self {
        match &err {
            InternalError::Workflow(w) => match w {
                WorkflowError::InvalidTransition { .. } => {
                    tracing::debug!("rejected transition: {}", w);
                    Self::invalid_transition(w.to_string())
                }
                WorkflowError::MissingAssignment => Self::missing_assignment(),
                WorkflowError::TerminalState(_) => {
                    tracing::debug!("rejected transition: {}", w);
                    Self::terminal_state(w.to_string())
                }
                WorkflowError::Unauthorized => Self::forbidden(),
                WorkflowError::ConcurrentModification => {
                    tracing::warn!("concurrent modification surfaced to client");
                    Self::concurrent_modification()
                }
                WorkflowError::RecordNotFound(id) => Self::not_found(id),
            },
            _ => {
                tracing::error!("internal error in complaint endpoint: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest(json)
            | Self::Unauthenticated(json)
            | Self::Forbidden(json)
            | Self::NotFound(json)
            | Self::Conflict(json)
            | Self::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ComplaintApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
