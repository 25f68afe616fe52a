use sea_orm::entity::prelude::*;

/// SeaORM entity for the complaint_history table
///
/// Append-only audit trail. The auto-increment id doubles as the append
/// order; timestamps are clamped non-decreasing per complaint on insert.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "complaint_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub complaint_id: String,
    pub status: String,
    pub actor_id: Option<String>,
    pub actor_role: Option<String>,
    pub comment: Option<String>,
    pub timestamp: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
