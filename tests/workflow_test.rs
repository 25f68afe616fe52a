mod common;

use common::{admin, assert_invariants, authority, citizen, file_complaint, setup};
use reclamo_backend::errors::{InternalError, WorkflowError};
use reclamo_backend::types::internal::complaint::ComplaintStatus;

fn workflow_err(err: InternalError) -> WorkflowError {
    match err {
        InternalError::Workflow(w) => w,
        other => panic!("expected workflow error, got: {}", other),
    }
}

#[tokio::test]
async fn creation_seeds_registered_history() {
    let env = setup().await;
    let record = file_complaint(&env.store, "citizen-1").await;

    assert_eq!(record.status, "registered");
    let history = env.store.history(&record.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, "registered");
    assert_eq!(history[0].actor_id.as_deref(), Some("citizen-1"));
    assert_invariants(&env, &record.id).await;
}

#[tokio::test]
async fn anonymous_creation_has_no_actor_on_initial_entry() {
    let env = setup().await;
    let record = env
        .store
        .create(reclamo_backend::stores::NewComplaint {
            title: "Noise complaint".to_string(),
            description: "Loud construction at night".to_string(),
            category: reclamo_backend::types::internal::complaint::Category::Other,
            latitude: 0.0,
            longitude: 0.0,
            address: None,
            is_anonymous: true,
            owner_id: "citizen-9".to_string(),
        })
        .await
        .unwrap();

    let history = env.store.history(&record.id).await.unwrap();
    assert_eq!(history[0].actor_id, None);
    assert_eq!(history[0].actor_role, None);
}

#[tokio::test]
async fn full_lifecycle_scenario() {
    let env = setup().await;
    let record = file_complaint(&env.store, "citizen-1").await;
    let id = record.id.clone();

    // Authority moves registered -> pending, no area needed
    let updated = env
        .engine
        .transition(&authority(), &id, ComplaintStatus::Pending, None, None)
        .await
        .expect("registered -> pending should succeed");
    assert_eq!(updated.status, "pending");
    assert_eq!(env.store.history(&id).await.unwrap().len(), 2);
    assert_invariants(&env, &id).await;

    // pending -> assigned without an area is rejected, record unchanged
    let err = env
        .engine
        .transition(&authority(), &id, ComplaintStatus::Assigned, None, None)
        .await
        .unwrap_err();
    assert_eq!(workflow_err(err), WorkflowError::MissingAssignment);
    assert_eq!(env.store.history(&id).await.unwrap().len(), 2);
    assert_invariants(&env, &id).await;

    // pending -> assigned with an area succeeds and records the area;
    // the order admits skipping in_review on the way forward
    let updated = env
        .engine
        .transition(
            &authority(),
            &id,
            ComplaintStatus::Assigned,
            Some("Obras Públicas"),
            Some("dispatched to public works"),
        )
        .await
        .expect("pending -> assigned should succeed");
    assert_eq!(updated.status, "assigned");
    assert_eq!(updated.assigned_area.as_deref(), Some("Obras Públicas"));
    let history = env.store.history(&id).await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(
        history.last().unwrap().comment.as_deref(),
        Some("dispatched to public works")
    );
    assert_invariants(&env, &id).await;

    // Admin force-closes from assigned
    let updated = env
        .engine
        .transition(&admin(), &id, ComplaintStatus::Closed, None, None)
        .await
        .expect("admin force close should succeed");
    assert_eq!(updated.status, "closed");
    assert_eq!(updated.assigned_area, None, "area cleared on close");
    assert_eq!(env.store.history(&id).await.unwrap().len(), 4);
    assert_invariants(&env, &id).await;

    // Closed is terminal
    let err = env
        .engine
        .transition(&admin(), &id, ComplaintStatus::Pending, None, None)
        .await
        .unwrap_err();
    assert_eq!(
        workflow_err(err),
        WorkflowError::TerminalState(ComplaintStatus::Closed)
    );
    assert_eq!(env.store.history(&id).await.unwrap().len(), 4);
}

#[tokio::test]
async fn resolved_is_terminal() {
    let env = setup().await;
    let record = file_complaint(&env.store, "citizen-1").await;
    let id = record.id.clone();

    for (target, area) in [
        (ComplaintStatus::Pending, None),
        (ComplaintStatus::InReview, None),
        (ComplaintStatus::Assigned, Some("Alumbrado")),
        (ComplaintStatus::InProcess, Some("Alumbrado")),
        (ComplaintStatus::Resolved, None),
    ] {
        env.engine
            .transition(&authority(), &id, target, area, None)
            .await
            .unwrap_or_else(|e| panic!("transition to {} failed: {}", target, e));
        assert_invariants(&env, &id).await;
    }

    let record = env.store.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(record.status, "resolved");
    assert_eq!(record.assigned_area, None, "area cleared on resolve");

    // Not even an admin can leave resolved
    let err = env
        .engine
        .transition(&admin(), &id, ComplaintStatus::Closed, None, None)
        .await
        .unwrap_err();
    assert_eq!(
        workflow_err(err),
        WorkflowError::TerminalState(ComplaintStatus::Resolved)
    );
}

#[tokio::test]
async fn citizens_cannot_transition() {
    let env = setup().await;
    let record = file_complaint(&env.store, "citizen-1").await;

    // Not even the owner
    let err = env
        .engine
        .transition(
            &citizen("citizen-1"),
            &record.id,
            ComplaintStatus::Pending,
            None,
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(workflow_err(err), WorkflowError::Unauthorized);
    assert_eq!(env.store.history(&record.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn force_close_is_admin_only() {
    let env = setup().await;
    let record = file_complaint(&env.store, "citizen-1").await;

    let err = env
        .engine
        .transition(&authority(), &record.id, ComplaintStatus::Closed, None, None)
        .await
        .unwrap_err();
    assert_eq!(workflow_err(err), WorkflowError::Unauthorized);

    env.engine
        .transition(&admin(), &record.id, ComplaintStatus::Closed, None, None)
        .await
        .expect("admin can force close from registered");
    assert_invariants(&env, &record.id).await;
}

#[tokio::test]
async fn unknown_record_reports_not_found() {
    let env = setup().await;
    let err = env
        .engine
        .transition(&authority(), "no-such-id", ComplaintStatus::Pending, None, None)
        .await
        .unwrap_err();
    assert_eq!(
        workflow_err(err),
        WorkflowError::RecordNotFound("no-such-id".to_string())
    );
}

#[tokio::test]
async fn details_editable_only_while_registered() {
    let env = setup().await;
    let record = file_complaint(&env.store, "citizen-1").await;

    let updated = env
        .store
        .update_details(&record.id, Some("Bigger pothole"), None)
        .await
        .expect("edit while registered succeeds");
    assert_eq!(updated.title, "Bigger pothole");

    env.engine
        .transition(&authority(), &record.id, ComplaintStatus::Pending, None, None)
        .await
        .unwrap();

    // The status guard on the update rejects the edit after the first
    // state change
    let err = env
        .store
        .update_details(&record.id, Some("Too late"), None)
        .await
        .unwrap_err();
    assert_eq!(workflow_err(err), WorkflowError::ConcurrentModification);
    let record = env.store.find_by_id(&record.id).await.unwrap().unwrap();
    assert_eq!(record.title, "Bigger pothole");
}

#[tokio::test]
async fn reassign_owner_moves_record() {
    let env = setup().await;
    let record = file_complaint(&env.store, "citizen-1").await;

    let updated = env
        .store
        .reassign_owner(&record.id, "citizen-2")
        .await
        .expect("reassign succeeds");
    assert_eq!(updated.owner_id, "citizen-2");
}
