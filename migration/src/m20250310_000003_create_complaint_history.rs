use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only audit trail; rows are never updated or deleted
        manager
            .create_table(
                Table::create()
                    .table(ComplaintHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ComplaintHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ComplaintHistory::ComplaintId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ComplaintHistory::Status).string().not_null())
                    .col(ColumnDef::new(ComplaintHistory::ActorId).string().null())
                    .col(ColumnDef::new(ComplaintHistory::ActorRole).string().null())
                    .col(ColumnDef::new(ComplaintHistory::Comment).string().null())
                    .col(
                        ColumnDef::new(ComplaintHistory::Timestamp)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on complaint_id for timeline reconstruction
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_complaint_history_complaint")
                    .table(ComplaintHistory::Table)
                    .col(ComplaintHistory::ComplaintId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComplaintHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ComplaintHistory {
    Table,
    Id,
    ComplaintId,
    Status,
    ActorId,
    ActorRole,
    Comment,
    Timestamp,
}
