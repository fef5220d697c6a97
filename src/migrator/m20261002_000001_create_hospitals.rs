use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hospitals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hospitals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Hospitals::Name).string().not_null())
                    .col(ColumnDef::new(Hospitals::Address).text().not_null())
                    .col(ColumnDef::new(Hospitals::Latitude).double().not_null())
                    .col(ColumnDef::new(Hospitals::Longitude).double().not_null())
                    .col(ColumnDef::new(Hospitals::Contact).string().not_null())
                    .col(
                        ColumnDef::new(Hospitals::TotalBeds)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Hospitals::AvailableBeds)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Hospitals::EmergencyCapacity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Hospitals::IcuCapacity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Hospitals::Status)
                            .string()
                            .not_null()
                            .default("operational"),
                    )
                    .col(ColumnDef::new(Hospitals::UpdatedBy).string())
                    .col(ColumnDef::new(Hospitals::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Hospitals::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Hospitals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Hospitals {
    Table,
    Id,
    Name,
    Address,
    Latitude,
    Longitude,
    Contact,
    TotalBeds,
    AvailableBeds,
    EmergencyCapacity,
    IcuCapacity,
    Status,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}
