use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::BearerAuth;
use crate::errors::api::AuthError;
use crate::services::TokenService;
use crate::stores::CredentialStore;
use crate::types::dto::auth::{
    LoginRequest, RegisterRequest, RegisterResponse, TokenResponse, WhoAmIResponse,
};
use crate::types::internal::complaint::Role;

/// Authentication API endpoints
pub struct AuthApi {
    credential_store: Arc<CredentialStore>,
    token_service: Arc<TokenService>,
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

impl AuthApi {
    /// Create a new AuthApi with the given CredentialStore and TokenService
    pub fn new(credential_store: Arc<CredentialStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            credential_store,
            token_service,
        }
    }
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new citizen account
    ///
    /// Authority and admin accounts are provisioned through the CLI, never
    /// through this endpoint.
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<RegisterResponse>, AuthError> {
        let user_id = self
            .credential_store
            .add_user(body.username.clone(), body.password.clone(), Role::Citizen)
            .await
            .map_err(AuthError::from_internal)?;

        Ok(Json(RegisterResponse { user_id }))
    }

    /// Login with username and password to receive an authentication token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let (user_id, role) = self
            .credential_store
            .verify_credentials(&body.username, &body.password)
            .await
            .map_err(AuthError::from_internal)?;

        let access_token = self.token_service.generate_jwt(&user_id, role)?;

        Ok(Json(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.expires_in(),
        }))
    }

    /// Verify JWT and return user information
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, auth: BearerAuth) -> Result<Json<WhoAmIResponse>, AuthError> {
        let claims = self.token_service.validate_jwt(&auth.0.token)?;
        let role = Role::parse(&claims.role).map_err(|_| AuthError::invalid_token())?;

        Ok(Json(WhoAmIResponse {
            user_id: claims.sub,
            role,
            expires_at: claims.exp,
        }))
    }
}
