use chrono::Utc;
use poem_openapi::{payload::Json, OpenApi, Tags};
use sea_orm::DatabaseConnection;

use crate::types::dto::common::HealthResponse;

/// Health check API
pub struct HealthApi {
    db: DatabaseConnection,
}

/// API tags for health endpoints
#[derive(Tags)]
enum ApiTags {
    /// Health check endpoints
    Health,
}

impl HealthApi {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[OpenApi]
impl HealthApi {
    /// Health check endpoint
    ///
    /// Reports service identity and whether the complaint database answers
    /// a ping. Always returns 200; a degraded database shows up in the body.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        let database = match self.db.ping().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("database ping failed during health check: {}", err);
                false
            }
        };
        Json(HealthResponse {
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: if database { "healthy" } else { "degraded" }.to_string(),
            database,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
