use sea_orm::entity::prelude::*;

/// SeaORM entity for the complaints table
///
/// `status` and `assigned_area` are only ever written through
/// `ComplaintStore::apply_transition`, which guards them with a status
/// precondition inside a transaction.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub assigned_area: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub is_anonymous: bool,
    pub owner_id: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
