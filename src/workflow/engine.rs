use std::sync::Arc;

use crate::errors::{InternalError, WorkflowError};
use crate::services::notifier::Notifier;
use crate::stores::ComplaintStore;
use crate::types::db::complaint;
use crate::types::internal::complaint::{ComplaintAction, ComplaintStatus};
use crate::types::internal::context::RequestContext;
use crate::workflow::role_gate;

/// Bounded optimistic-concurrency retries before surfacing the conflict
const MAX_TRANSITION_ATTEMPTS: u32 = 3;

/// Position of a status in the workflow order
///
/// Transitions move strictly forward along this order; there are no
/// back-transitions. `closed` sits at the end but is reachable only
/// through the admin-only force-close edge, since `resolved` (the only
/// status it would follow) is terminal.
fn rank(status: ComplaintStatus) -> u8 {
    match status {
        ComplaintStatus::Registered => 0,
        ComplaintStatus::Pending => 1,
        ComplaintStatus::InReview => 2,
        ComplaintStatus::Assigned => 3,
        ComplaintStatus::InProcess => 4,
        ComplaintStatus::Resolved => 5,
        ComplaintStatus::Closed => 6,
    }
}

/// Classify the requested edge into the role-gate action it requires
fn classify_action(target: ComplaintStatus) -> ComplaintAction {
    if target == ComplaintStatus::Closed {
        ComplaintAction::ForceClose
    } else {
        ComplaintAction::Transition
    }
}

/// Validate a requested transition without touching storage
///
/// Check order: role gate, terminal source, edge existence, assignment
/// requirement. The first failure wins, so a citizen always sees
/// `Unauthorized` and an admin forcing out of `resolved` sees
/// `TerminalState`.
pub fn validate_transition(
    ctx: &RequestContext,
    record: &complaint::Model,
    current: ComplaintStatus,
    target: ComplaintStatus,
    area: Option<&str>,
) -> Result<(), WorkflowError> {
    let action = classify_action(target);
    if !role_gate::authorize(ctx, action, Some(record)) {
        return Err(WorkflowError::Unauthorized);
    }

    if current.is_terminal() {
        return Err(WorkflowError::TerminalState(current));
    }

    let is_forward = rank(target) > rank(current);
    if !is_forward {
        return Err(WorkflowError::InvalidTransition {
            from: current,
            to: target,
        });
    }

    if target.requires_area() && area.map_or(true, |a| a.trim().is_empty()) {
        return Err(WorkflowError::MissingAssignment);
    }

    Ok(())
}

/// Validates and applies status changes, appending audit entries
///
/// Writes go through the store's precondition-guarded transaction so that
/// the status update and the audit append are all-or-nothing. Conflicting
/// writers are retried against the re-read state a bounded number of times.
pub struct TransitionEngine {
    store: Arc<ComplaintStore>,
    notifier: Arc<dyn Notifier>,
}

impl TransitionEngine {
    pub fn new(store: Arc<ComplaintStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Apply a status transition on behalf of the actor in `ctx`
    ///
    /// Returns the updated record, or the typed workflow outcome wrapped in
    /// `InternalError::Workflow`.
    pub async fn transition(
        &self,
        ctx: &RequestContext,
        id: &str,
        target: ComplaintStatus,
        area: Option<&str>,
        comment: Option<&str>,
    ) -> Result<complaint::Model, InternalError> {
        for attempt in 1..=MAX_TRANSITION_ATTEMPTS {
            let record = self
                .store
                .find_by_id(id)
                .await?
                .ok_or_else(|| WorkflowError::RecordNotFound(id.to_string()))?;
            let current = ComplaintStatus::parse(&record.status)?;

            validate_transition(ctx, &record, current, target, area)?;

            match self
                .store
                .apply_transition(id, current, target, area, ctx, comment)
                .await
            {
                Ok(updated) => {
                    tracing::info!(
                        request_id = %ctx.request_id,
                        complaint_id = %id,
                        from = %current,
                        to = %target,
                        ip = ?ctx.ip_address,
                        "complaint transitioned"
                    );
                    // Notification is best-effort; a failure never unwinds
                    // the committed transition.
                    if let Err(e) = self.notifier.status_changed(&updated, target).await {
                        tracing::warn!(
                            complaint_id = %id,
                            "status notification failed: {}",
                            e
                        );
                    }
                    return Ok(updated);
                }
                Err(InternalError::Workflow(WorkflowError::ConcurrentModification)) => {
                    tracing::debug!(
                        complaint_id = %id,
                        attempt,
                        "transition hit concurrent write, re-reading"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(WorkflowError::ConcurrentModification.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::complaint::Role;

    fn record(status: ComplaintStatus) -> complaint::Model {
        complaint::Model {
            id: "c-1".to_string(),
            title: "Pothole".to_string(),
            description: "Deep pothole on the main road".to_string(),
            category: "roads".to_string(),
            status: status.as_str().to_string(),
            assigned_area: None,
            latitude: -34.6,
            longitude: -58.4,
            address: None,
            is_anonymous: false,
            owner_id: "citizen-1".to_string(),
            created_at: 0,
        }
    }

    fn authority() -> RequestContext {
        RequestContext::new("auth-1", Role::Authority)
    }

    fn admin() -> RequestContext {
        RequestContext::new("admin-1", Role::Admin)
    }

    fn citizen() -> RequestContext {
        RequestContext::new("citizen-1", Role::Citizen)
    }

    #[test]
    fn chain_edges_validate() {
        let cases = [
            (ComplaintStatus::Registered, ComplaintStatus::Pending),
            (ComplaintStatus::Pending, ComplaintStatus::InReview),
            (ComplaintStatus::InReview, ComplaintStatus::Assigned),
            (ComplaintStatus::Assigned, ComplaintStatus::InProcess),
            (ComplaintStatus::InProcess, ComplaintStatus::Resolved),
        ];
        for (from, to) in cases {
            let r = record(from);
            let area = to.requires_area().then_some("Obras Públicas");
            assert_eq!(
                validate_transition(&authority(), &r, from, to, area),
                Ok(()),
                "{} -> {}",
                from,
                to
            );
        }
    }

    #[test]
    fn forward_skips_are_valid() {
        // The order admits skipping intermediate statuses
        let r = record(ComplaintStatus::Pending);
        assert_eq!(
            validate_transition(
                &authority(),
                &r,
                ComplaintStatus::Pending,
                ComplaintStatus::Assigned,
                Some("Obras Públicas")
            ),
            Ok(())
        );
    }

    #[test]
    fn back_and_self_transitions_are_invalid() {
        let r = record(ComplaintStatus::InReview);
        assert_eq!(
            validate_transition(
                &authority(),
                &r,
                ComplaintStatus::InReview,
                ComplaintStatus::Pending,
                None
            ),
            Err(WorkflowError::InvalidTransition {
                from: ComplaintStatus::InReview,
                to: ComplaintStatus::Pending,
            })
        );

        let r = record(ComplaintStatus::Pending);
        assert_eq!(
            validate_transition(
                &authority(),
                &r,
                ComplaintStatus::Pending,
                ComplaintStatus::Pending,
                None
            ),
            Err(WorkflowError::InvalidTransition {
                from: ComplaintStatus::Pending,
                to: ComplaintStatus::Pending,
            })
        );
    }

    #[test]
    fn assigned_requires_area() {
        let r = record(ComplaintStatus::InReview);
        assert_eq!(
            validate_transition(
                &authority(),
                &r,
                ComplaintStatus::InReview,
                ComplaintStatus::Assigned,
                None
            ),
            Err(WorkflowError::MissingAssignment)
        );
        // Whitespace-only does not count
        assert_eq!(
            validate_transition(
                &authority(),
                &r,
                ComplaintStatus::InReview,
                ComplaintStatus::Assigned,
                Some("   ")
            ),
            Err(WorkflowError::MissingAssignment)
        );
    }

    #[test]
    fn in_process_requires_area_in_same_call() {
        let r = record(ComplaintStatus::Assigned);
        assert_eq!(
            validate_transition(
                &authority(),
                &r,
                ComplaintStatus::Assigned,
                ComplaintStatus::InProcess,
                None
            ),
            Err(WorkflowError::MissingAssignment)
        );
    }

    #[test]
    fn terminal_states_reject_everything() {
        for terminal in [ComplaintStatus::Resolved, ComplaintStatus::Closed] {
            let r = record(terminal);
            assert_eq!(
                validate_transition(&admin(), &r, terminal, ComplaintStatus::Closed, None),
                Err(WorkflowError::TerminalState(terminal))
            );
        }
    }

    #[test]
    fn citizens_are_unauthorized_before_anything_else() {
        // Even an invalid edge or terminal source reports Unauthorized first
        let r = record(ComplaintStatus::Resolved);
        assert_eq!(
            validate_transition(
                &citizen(),
                &r,
                ComplaintStatus::Resolved,
                ComplaintStatus::Closed,
                None
            ),
            Err(WorkflowError::Unauthorized)
        );
    }

    #[test]
    fn force_close_is_admin_only() {
        let r = record(ComplaintStatus::Assigned);
        assert_eq!(
            validate_transition(
                &authority(),
                &r,
                ComplaintStatus::Assigned,
                ComplaintStatus::Closed,
                None
            ),
            Err(WorkflowError::Unauthorized)
        );
        assert_eq!(
            validate_transition(
                &admin(),
                &r,
                ComplaintStatus::Assigned,
                ComplaintStatus::Closed,
                None
            ),
            Ok(())
        );
    }

    #[test]
    fn force_close_works_from_every_non_terminal_state() {
        for from in [
            ComplaintStatus::Registered,
            ComplaintStatus::Pending,
            ComplaintStatus::InReview,
            ComplaintStatus::Assigned,
            ComplaintStatus::InProcess,
        ] {
            let r = record(from);
            assert_eq!(
                validate_transition(&admin(), &r, from, ComplaintStatus::Closed, None),
                Ok(()),
                "force close from {}",
                from
            );
        }
    }
}
