use async_trait::async_trait;
use thiserror::Error;

use crate::types::db::complaint;
use crate::types::internal::complaint::ComplaintStatus;

/// Failure to deliver a status notification
///
/// Never rolls back the transition that triggered it; the engine logs and
/// suppresses these.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Collaborator invoked after a successful transition
///
/// Implementations deliver the "your complaint moved to X" signal (email,
/// webhook, ...). Delivery is best-effort by contract.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn status_changed(
        &self,
        complaint: &complaint::Model,
        status: ComplaintStatus,
    ) -> Result<(), NotifyError>;
}

/// Notifier that records transitions in the application log
///
/// Stands in for the email service; the workflow only needs the
/// best-effort contract.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn status_changed(
        &self,
        complaint: &complaint::Model,
        status: ComplaintStatus,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            complaint_id = %complaint.id,
            owner_id = %complaint.owner_id,
            status = %status,
            "complaint status notification"
        );
        Ok(())
    }
}
