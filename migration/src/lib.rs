pub use sea_orm_migration::prelude::*;

mod m20250310_000001_create_users;
mod m20250310_000002_create_complaints;
mod m20250310_000003_create_complaint_history;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000001_create_users::Migration),
            Box::new(m20250310_000002_create_complaints::Migration),
            Box::new(m20250310_000003_create_complaint_history::Migration),
        ]
    }
}
