use thiserror::Error;

use crate::types::internal::complaint::ComplaintStatus;

/// Typed outcomes of a rejected workflow operation
///
/// These are ordinary results surfaced to the route layer, never panics.
/// The route layer owns the user-facing messaging; see
/// `errors::api::complaint` for the HTTP mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// The requested edge does not exist in the transition table
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: ComplaintStatus,
        to: ComplaintStatus,
    },

    /// Transition into assigned/in_process without a responsible area
    #[error("transition requires a non-empty assigned area")]
    MissingAssignment,

    /// The complaint is in a terminal state; nothing may leave it
    #[error("complaint is in terminal state {0}")]
    TerminalState(ComplaintStatus),

    /// The actor's role does not permit the attempted action
    #[error("actor is not authorized for this action")]
    Unauthorized,

    /// Another writer changed the record between read and commit
    #[error("complaint was modified concurrently")]
    ConcurrentModification,

    /// No complaint exists with the given id
    #[error("complaint not found: {0}")]
    RecordNotFound(String),
}
