use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Citizens
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string())
                    .col(ColumnDef::new(Users::City).string())
                    .col(ColumnDef::new(Users::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Department staff
        manager
            .create_table(
                Table::create()
                    .table(DepartmentAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DepartmentAccounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DepartmentAccounts::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(DepartmentAccounts::PasswordHash)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DepartmentAccounts::Name).string().not_null())
                    .col(ColumnDef::new(DepartmentAccounts::Role).string().not_null())
                    .col(
                        ColumnDef::new(DepartmentAccounts::Department)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DepartmentAccounts::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DepartmentAccounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    Phone,
    City,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DepartmentAccounts {
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    Role,
    Department,
    CreatedAt,
}
