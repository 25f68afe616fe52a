use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::complaint::Role;

/// Request model for citizen registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Username for the new account
    pub username: String,

    /// Password for the new account
    pub password: String,
}

/// Response model for registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// User ID (UUID) of the created account
    pub user_id: String,
}

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// Response model containing the authentication token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,
}

/// Response model for whoami endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// User ID (UUID)
    pub user_id: String,

    /// Role of the authenticated user
    pub role: Role,

    /// Token expiration time (Unix timestamp)
    pub expires_at: i64,
}
