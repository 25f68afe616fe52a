#![allow(dead_code)]

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use reclamo_backend::services::LogNotifier;
use reclamo_backend::stores::{ComplaintStore, CredentialStore, NewComplaint};
use reclamo_backend::types::db::complaint;
use reclamo_backend::types::internal::complaint::{Category, ComplaintStatus, Role};
use reclamo_backend::types::internal::context::RequestContext;
use reclamo_backend::workflow::TransitionEngine;

pub struct TestEnv {
    pub db: DatabaseConnection,
    pub store: Arc<ComplaintStore>,
    pub credentials: Arc<CredentialStore>,
    pub engine: TransitionEngine,
}

/// Create an in-memory SQLite database with migrations applied and the
/// workflow wired against it
pub async fn setup() -> TestEnv {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let store = Arc::new(ComplaintStore::new(db.clone()));
    let credentials = Arc::new(CredentialStore::new(
        db.clone(),
        "test-pepper-for-integration-tests".to_string(),
    ));
    let engine = TransitionEngine::new(Arc::clone(&store), Arc::new(LogNotifier));

    TestEnv {
        db,
        store,
        credentials,
        engine,
    }
}

pub fn citizen(id: &str) -> RequestContext {
    RequestContext::new(id, Role::Citizen)
}

pub fn authority() -> RequestContext {
    RequestContext::new("authority-1", Role::Authority)
}

pub fn admin() -> RequestContext {
    RequestContext::new("admin-1", Role::Admin)
}

/// File a fresh complaint owned by `owner_id`
pub async fn file_complaint(store: &ComplaintStore, owner_id: &str) -> complaint::Model {
    store
        .create(NewComplaint {
            title: "Pothole on Main St".to_string(),
            description: "Deep pothole near the school crossing".to_string(),
            category: Category::Roads,
            latitude: -34.6037,
            longitude: -58.3816,
            address: Some("Main St 123".to_string()),
            is_anonymous: false,
            owner_id: owner_id.to_string(),
        })
        .await
        .expect("Failed to create complaint")
}

/// Check the record-level invariants that must hold after every operation:
/// non-empty history, last entry status equals the record status, and
/// assigned_area set exactly for assigned/in_process.
pub async fn assert_invariants(env: &TestEnv, id: &str) {
    let record = env
        .store
        .find_by_id(id)
        .await
        .expect("Failed to fetch complaint")
        .expect("Complaint should exist");
    let history = env.store.history(id).await.expect("Failed to fetch history");

    assert!(!history.is_empty(), "history must never be empty");
    let last = history.last().expect("non-empty");
    assert_eq!(
        last.status, record.status,
        "last history entry must match record status"
    );

    let status = ComplaintStatus::parse(&record.status).expect("stored status parses");
    assert_eq!(
        record.assigned_area.is_some(),
        status.requires_area(),
        "assigned_area must be set exactly for assigned/in_process"
    );

    // Timestamps are non-decreasing in append order
    for pair in history.windows(2) {
        assert!(
            pair[0].timestamp <= pair[1].timestamp,
            "history timestamps must be non-decreasing"
        );
    }
}
