use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Disasters::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Disasters::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Disasters::DisasterType).string().not_null())
                    .col(ColumnDef::new(Disasters::Name).string().not_null())
                    .col(ColumnDef::new(Disasters::Severity).string().not_null())
                    .col(
                        ColumnDef::new(Disasters::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Disasters::AffectedAreas).json().not_null())
                    .col(ColumnDef::new(Disasters::Description).text())
                    .col(ColumnDef::new(Disasters::StartedAt).date_time().not_null())
                    .col(ColumnDef::new(Disasters::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_disasters_status")
                    .table(Disasters::Table)
                    .col(Disasters::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Disasters::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Disasters {
    Table,
    Id,
    DisasterType,
    Name,
    Severity,
    Status,
    AffectedAreas,
    Description,
    StartedAt,
    UpdatedAt,
}
