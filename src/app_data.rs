use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::AreaCatalog;
use crate::services::{LogNotifier, TokenService};
use crate::stores::{ComplaintStore, CredentialStore};
use crate::workflow::TransitionEngine;

/// Centralized application data following the main-owned stores pattern
///
/// All stores and services are created once here and shared via Arc across
/// the API layer, the transition engine and the CLI.
pub struct AppData {
    pub db: DatabaseConnection,
    pub credential_store: Arc<CredentialStore>,
    pub complaint_store: Arc<ComplaintStore>,
    pub token_service: Arc<TokenService>,
    pub engine: Arc<TransitionEngine>,
    pub areas: AreaCatalog,
}

impl AppData {
    /// Wire up stores and services against an established connection
    ///
    /// Secrets come from the environment: `JWT_SECRET` is required,
    /// `PASSWORD_PEPPER` is required.
    pub fn init(
        db: DatabaseConnection,
        jwt_secret: String,
        password_pepper: String,
    ) -> Self {
        let credential_store = Arc::new(CredentialStore::new(db.clone(), password_pepper));
        let complaint_store = Arc::new(ComplaintStore::new(db.clone()));
        let token_service = Arc::new(TokenService::new(jwt_secret));
        let engine = Arc::new(TransitionEngine::new(
            Arc::clone(&complaint_store),
            Arc::new(LogNotifier),
        ));
        let areas = AreaCatalog::from_env();

        Self {
            db,
            credential_store,
            complaint_store,
            token_service,
            engine,
            areas,
        }
    }
}
