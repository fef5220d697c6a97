use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SosAlerts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SosAlerts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(SosAlerts::UserId).integer()) // anonymous alerts have none
                    .col(ColumnDef::new(SosAlerts::UserName).string().not_null())
                    .col(ColumnDef::new(SosAlerts::UserEmail).string())
                    .col(ColumnDef::new(SosAlerts::ContactNumber).string().not_null())
                    .col(ColumnDef::new(SosAlerts::Latitude).double().not_null())
                    .col(ColumnDef::new(SosAlerts::Longitude).double().not_null())
                    .col(ColumnDef::new(SosAlerts::Address).text())
                    .col(ColumnDef::new(SosAlerts::Details).text().not_null())
                    .col(ColumnDef::new(SosAlerts::Priority).string().not_null())
                    .col(
                        ColumnDef::new(SosAlerts::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(SosAlerts::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(SosAlerts::RespondedBy).string())
                    .col(ColumnDef::new(SosAlerts::Resolution).text())
                    .col(ColumnDef::new(SosAlerts::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(SosAlerts::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sos_alerts_user")
                            .from(SosAlerts::Table, SosAlerts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sos_alerts_status")
                    .table(SosAlerts::Table)
                    .col(SosAlerts::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sos_alerts_user_id")
                    .table(SosAlerts::Table)
                    .col(SosAlerts::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SosAlerts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SosAlerts {
    Table,
    Id,
    UserId,
    UserName,
    UserEmail,
    ContactNumber,
    Latitude,
    Longitude,
    Address,
    Details,
    Priority,
    Status,
    Version,
    RespondedBy,
    Resolution,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
