// API-facing error enums (poem-openapi ApiResponse)
pub mod auth;
pub mod complaint;

pub use auth::AuthError;
pub use complaint::ComplaintApiError;
