use uuid::Uuid;

use crate::types::internal::complaint::Role;

/// Request context that flows through all layers
///
/// Carries the authenticated actor's identity and role explicitly so that
/// the role gate and transition engine never reach into ambient state for
/// authentication information.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request (for tracing across layers)
    pub request_id: String,

    /// Authenticated actor's user id
    pub actor_id: String,

    /// Authenticated actor's role
    pub role: Role,

    /// IP address of the client making the request
    pub ip_address: Option<String>,
}

impl RequestContext {
    /// Create a new RequestContext with a generated request_id
    pub fn new(actor_id: impl Into<String>, role: Role) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            actor_id: actor_id.into(),
            role,
            ip_address: None,
        }
    }

    /// Set the ip_address
    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_generates_request_id_without_address() {
        let ctx = RequestContext::new("user-1", Role::Citizen);
        assert!(!ctx.request_id.is_empty());
        assert_eq!(ctx.ip_address, None);
    }

    #[test]
    fn builder_attaches_client_address() {
        let ctx = RequestContext::new("user-1", Role::Admin).with_ip_address("203.0.113.9");
        assert_eq!(ctx.ip_address.as_deref(), Some("203.0.113.9"));
    }
}
