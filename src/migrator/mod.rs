use sea_orm_migration::prelude::*;

mod m20261001_000001_create_accounts;
mod m20261001_000002_create_sos_alerts;
mod m20261002_000001_create_hospitals;
mod m20261002_000002_create_disasters;
mod m20261003_000001_create_kv_store;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_accounts::Migration),
            Box::new(m20261001_000002_create_sos_alerts::Migration),
            Box::new(m20261002_000001_create_hospitals::Migration),
            Box::new(m20261002_000002_create_disasters::Migration),
            Box::new(m20261003_000001_create_kv_store::Migration),
        ]
    }
}
