use crate::types::db::complaint;
use crate::types::internal::complaint::{ComplaintAction, ComplaintStatus, Role};
use crate::types::internal::context::RequestContext;

/// Decide whether the actor may perform `action` against `record`
///
/// Pure predicate, shared by the HTTP layer and the transition engine.
/// Absence of permission is a normal `false`, never an error, and any
/// combination not explicitly allowed below is denied (fails closed).
///
/// `record` is None for record-independent actions such as `Create`.
pub fn authorize(
    ctx: &RequestContext,
    action: ComplaintAction,
    record: Option<&complaint::Model>,
) -> bool {
    match (ctx.role, action) {
        // Citizens file complaints and work with their own records only
        (Role::Citizen, ComplaintAction::Create) => true,
        (Role::Citizen, ComplaintAction::View) => {
            record.is_some_and(|r| r.owner_id == ctx.actor_id)
        }
        // Details are editable only before the first state change
        (Role::Citizen, ComplaintAction::EditDetails) => record.is_some_and(|r| {
            r.owner_id == ctx.actor_id && r.status == ComplaintStatus::Registered.as_str()
        }),

        // Authorities triage any record
        (Role::Authority, ComplaintAction::View) => true,
        (Role::Authority, ComplaintAction::Transition) => true,

        // Admins get everything an authority gets, plus overrides
        (Role::Admin, ComplaintAction::View) => true,
        (Role::Admin, ComplaintAction::Transition) => true,
        (Role::Admin, ComplaintAction::ForceClose) => true,
        (Role::Admin, ComplaintAction::ReassignOwner) => true,

        // Fails closed
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(owner_id: &str, status: ComplaintStatus) -> complaint::Model {
        complaint::Model {
            id: "c-1".to_string(),
            title: "Broken streetlight".to_string(),
            description: "Dark corner at night".to_string(),
            category: "lighting".to_string(),
            status: status.as_str().to_string(),
            assigned_area: None,
            latitude: -34.6,
            longitude: -58.4,
            address: None,
            is_anonymous: false,
            owner_id: owner_id.to_string(),
            created_at: 0,
        }
    }

    fn ctx(actor_id: &str, role: Role) -> RequestContext {
        RequestContext::new(actor_id, role)
    }

    #[test]
    fn citizen_can_create_and_view_own() {
        let c = ctx("u1", Role::Citizen);
        let own = record("u1", ComplaintStatus::Registered);
        let other = record("u2", ComplaintStatus::Registered);

        assert!(authorize(&c, ComplaintAction::Create, None));
        assert!(authorize(&c, ComplaintAction::View, Some(&own)));
        assert!(!authorize(&c, ComplaintAction::View, Some(&other)));
    }

    #[test]
    fn citizen_can_edit_own_details_only_while_registered() {
        let c = ctx("u1", Role::Citizen);
        let fresh = record("u1", ComplaintStatus::Registered);
        let moved = record("u1", ComplaintStatus::Pending);

        assert!(authorize(&c, ComplaintAction::EditDetails, Some(&fresh)));
        assert!(!authorize(&c, ComplaintAction::EditDetails, Some(&moved)));
    }

    #[test]
    fn citizen_never_transitions() {
        let c = ctx("u1", Role::Citizen);
        let own = record("u1", ComplaintStatus::Registered);

        assert!(!authorize(&c, ComplaintAction::Transition, Some(&own)));
        assert!(!authorize(&c, ComplaintAction::ForceClose, Some(&own)));
        assert!(!authorize(&c, ComplaintAction::ReassignOwner, Some(&own)));
    }

    #[test]
    fn authority_views_and_transitions_any_record() {
        let a = ctx("auth-1", Role::Authority);
        let other = record("u2", ComplaintStatus::Pending);

        assert!(authorize(&a, ComplaintAction::View, Some(&other)));
        assert!(authorize(&a, ComplaintAction::Transition, Some(&other)));
    }

    #[test]
    fn authority_gets_no_admin_overrides() {
        let a = ctx("auth-1", Role::Authority);
        let other = record("u2", ComplaintStatus::Assigned);

        assert!(!authorize(&a, ComplaintAction::ForceClose, Some(&other)));
        assert!(!authorize(&a, ComplaintAction::ReassignOwner, Some(&other)));
        assert!(!authorize(&a, ComplaintAction::Create, None));
    }

    #[test]
    fn admin_gets_overrides() {
        let a = ctx("admin-1", Role::Admin);
        let other = record("u2", ComplaintStatus::Assigned);

        assert!(authorize(&a, ComplaintAction::Transition, Some(&other)));
        assert!(authorize(&a, ComplaintAction::ForceClose, Some(&other)));
        assert!(authorize(&a, ComplaintAction::ReassignOwner, Some(&other)));
    }

    #[test]
    fn missing_record_denies_record_scoped_actions() {
        let c = ctx("u1", Role::Citizen);

        assert!(!authorize(&c, ComplaintAction::View, None));
        assert!(!authorize(&c, ComplaintAction::EditDetails, None));
    }
}
