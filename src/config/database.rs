use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

/// Connect to the database named by `DATABASE_URL` (SQLite file by default)
pub async fn init_database() -> Result<DatabaseConnection, DbErr> {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://complaints.db?mode=rwc".to_string());
    tracing::info!("connecting to database: {}", database_url);
    Database::connect(&database_url).await
}

/// Run all pending migrations
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), DbErr> {
    tracing::info!("running database migrations");
    Migrator::up(db, None).await
}
