use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Complaints::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Complaints::Title).string().not_null())
                    .col(ColumnDef::new(Complaints::Description).string().not_null())
                    .col(ColumnDef::new(Complaints::Category).string().not_null())
                    .col(ColumnDef::new(Complaints::Status).string().not_null())
                    .col(ColumnDef::new(Complaints::AssignedArea).string().null())
                    .col(ColumnDef::new(Complaints::Latitude).double().not_null())
                    .col(ColumnDef::new(Complaints::Longitude).double().not_null())
                    .col(ColumnDef::new(Complaints::Address).string().null())
                    .col(
                        ColumnDef::new(Complaints::IsAnonymous)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Complaints::OwnerId).string().not_null())
                    .col(
                        ColumnDef::new(Complaints::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on owner_id for citizen listings
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_complaints_owner")
                    .table(Complaints::Table)
                    .col(Complaints::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Index on status for triage listings
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_complaints_status")
                    .table(Complaints::Table)
                    .col(Complaints::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaints::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Complaints {
    Table,
    Id,
    Title,
    Description,
    Category,
    Status,
    AssignedArea,
    Latitude,
    Longitude,
    Address,
    IsAnonymous,
    OwnerId,
    CreatedAt,
}
