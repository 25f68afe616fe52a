// Errors layer - Error type definitions
pub mod api;
pub mod internal;
pub mod workflow;

// Re-exports for convenience
pub use api::{AuthError, ComplaintApiError};
pub use internal::InternalError;
pub use workflow::WorkflowError;
