// API layer - HTTP endpoints
pub mod auth;
pub mod complaints;
pub mod health;

pub use auth::AuthApi;
pub use complaints::ComplaintsApi;
pub use health::HealthApi;

use poem_openapi::auth::Bearer;
use poem_openapi::SecurityScheme;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);
