use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::errors::{InternalError, WorkflowError};
use crate::types::db::{complaint, history_entry};
use crate::types::internal::complaint::{Category, ComplaintStatus, Role};
use crate::types::internal::context::RequestContext;

/// Fields supplied by a citizen filing a new complaint
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub is_anonymous: bool,
    pub owner_id: String,
}

/// Repository for complaint records and their append-only history
///
/// Owns the two atomic primitives the workflow relies on: creation (record
/// plus initial `registered` entry in one transaction) and
/// `apply_transition` (status update guarded by a status precondition plus
/// history append in one transaction).
pub struct ComplaintStore {
    db: DatabaseConnection,
}

impl ComplaintStore {
    /// Create a new ComplaintStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new complaint together with its initial history entry
    ///
    /// The record starts in `registered`. For anonymous complaints the
    /// initial audit entry carries no actor, so the trail does not reveal
    /// the filer.
    pub async fn create(&self, new: NewComplaint) -> Result<complaint::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("create_complaint", e))?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp();

        let record = complaint::ActiveModel {
            id: Set(id.clone()),
            title: Set(new.title),
            description: Set(new.description),
            category: Set(new.category.as_str().to_string()),
            status: Set(ComplaintStatus::Registered.as_str().to_string()),
            assigned_area: Set(None),
            latitude: Set(new.latitude),
            longitude: Set(new.longitude),
            address: Set(new.address),
            is_anonymous: Set(new.is_anonymous),
            owner_id: Set(new.owner_id.clone()),
            created_at: Set(now),
        };
        let inserted = record
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("insert_complaint", e))?;

        let (actor_id, actor_role) = if new.is_anonymous {
            (None, None)
        } else {
            (
                Some(new.owner_id),
                Some(Role::Citizen.as_str().to_string()),
            )
        };
        let initial_entry = history_entry::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            complaint_id: Set(id),
            status: Set(ComplaintStatus::Registered.as_str().to_string()),
            actor_id: Set(actor_id),
            actor_role: Set(actor_role),
            comment: Set(None),
            timestamp: Set(now),
        };
        initial_entry
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("insert_initial_history", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("create_complaint", e))?;

        Ok(inserted)
    }

    /// Fetch a complaint by id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<complaint::Model>, InternalError> {
        complaint::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_complaint", e))
    }

    /// List every complaint, newest first
    pub async fn list_all(&self) -> Result<Vec<complaint::Model>, InternalError> {
        complaint::Entity::find()
            .order_by_desc(complaint::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_complaints", e))
    }

    /// List complaints filed by one citizen, newest first
    pub async fn list_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<complaint::Model>, InternalError> {
        complaint::Entity::find()
            .filter(complaint::Column::OwnerId.eq(owner_id))
            .order_by_desc(complaint::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_complaints_by_owner", e))
    }

    /// Fetch a complaint's history in append order
    pub async fn history(&self, id: &str) -> Result<Vec<history_entry::Model>, InternalError> {
        history_entry::Entity::find()
            .filter(history_entry::Column::ComplaintId.eq(id))
            .order_by_asc(history_entry::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("fetch_history", e))
    }

    /// Atomically apply a validated transition
    ///
    /// The status update is filtered on `status == expected`; zero affected
    /// rows means someone else committed first (or the record vanished) and
    /// nothing is written. The history append happens in the same
    /// transaction, so a partial update is never observable. `assigned_area`
    /// is set for targets that require one and cleared otherwise, keeping
    /// the area-iff-assigned invariant.
    pub async fn apply_transition(
        &self,
        id: &str,
        expected: ComplaintStatus,
        target: ComplaintStatus,
        area: Option<&str>,
        ctx: &RequestContext,
        comment: Option<&str>,
    ) -> Result<complaint::Model, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("apply_transition", e))?;

        let next_area: Option<String> = if target.requires_area() {
            area.map(|a| a.trim().to_string())
        } else {
            None
        };

        let update = complaint::Entity::update_many()
            .col_expr(complaint::Column::Status, Expr::value(target.as_str()))
            .col_expr(
                complaint::Column::AssignedArea,
                Expr::value(next_area.clone()),
            )
            .filter(complaint::Column::Id.eq(id))
            .filter(complaint::Column::Status.eq(expected.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("update_complaint_status", e))?;

        if update.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| InternalError::transaction("apply_transition", e))?;
            let exists = self.find_by_id(id).await?.is_some();
            return Err(if exists {
                WorkflowError::ConcurrentModification.into()
            } else {
                WorkflowError::RecordNotFound(id.to_string()).into()
            });
        }

        // Clamp so history timestamps never decrease, even if the clock does
        let last_timestamp = history_entry::Entity::find()
            .filter(history_entry::Column::ComplaintId.eq(id))
            .order_by_desc(history_entry::Column::Id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("fetch_last_history", e))?
            .map(|e| e.timestamp)
            .unwrap_or(i64::MIN);
        let timestamp = Utc::now().timestamp().max(last_timestamp);

        let entry = history_entry::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            complaint_id: Set(id.to_string()),
            status: Set(target.as_str().to_string()),
            actor_id: Set(Some(ctx.actor_id.clone())),
            actor_role: Set(Some(ctx.role.as_str().to_string())),
            comment: Set(comment.map(str::to_string)),
            timestamp: Set(timestamp),
        };
        entry
            .insert(&txn)
            .await
            .map_err(|e| InternalError::database("insert_history", e))?;

        let updated = complaint::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database("reload_complaint", e))?
            .ok_or_else(|| WorkflowError::RecordNotFound(id.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("apply_transition", e))?;

        Ok(updated)
    }

    /// Update title/description while the record is still `registered`
    ///
    /// Guarded on the `registered` status so a concurrent transition cannot
    /// race the owner's edit window.
    pub async fn update_details(
        &self,
        id: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<complaint::Model, InternalError> {
        if title.is_none() && description.is_none() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| WorkflowError::RecordNotFound(id.to_string()).into());
        }

        let mut update = complaint::Entity::update_many()
            .filter(complaint::Column::Id.eq(id))
            .filter(complaint::Column::Status.eq(ComplaintStatus::Registered.as_str()));
        if let Some(title) = title {
            update = update.col_expr(complaint::Column::Title, Expr::value(title));
        }
        if let Some(description) = description {
            update = update.col_expr(complaint::Column::Description, Expr::value(description));
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("update_complaint_details", e))?;

        if result.rows_affected == 0 {
            let exists = self.find_by_id(id).await?.is_some();
            return Err(if exists {
                WorkflowError::ConcurrentModification.into()
            } else {
                WorkflowError::RecordNotFound(id.to_string()).into()
            });
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| WorkflowError::RecordNotFound(id.to_string()).into())
    }

    /// Reassign ownership of a complaint (admin action)
    pub async fn reassign_owner(
        &self,
        id: &str,
        new_owner_id: &str,
    ) -> Result<complaint::Model, InternalError> {
        let result = complaint::Entity::update_many()
            .col_expr(complaint::Column::OwnerId, Expr::value(new_owner_id))
            .filter(complaint::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("reassign_owner", e))?;

        if result.rows_affected == 0 {
            return Err(WorkflowError::RecordNotFound(id.to_string()).into());
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| WorkflowError::RecordNotFound(id.to_string()).into())
    }
}
