pub use sea_orm_migration::prelude::*;

mod m20251101_000001_academy;
mod m20251101_000002_subscription_plan;
mod m20251101_000003_subscription;
mod m20251101_000004_player;
mod m20251101_000005_document;
mod m20251101_000006_payment;
mod m20251101_000007_admin;
mod m20251101_000008_activity;
mod m20251101_000009_system_setting;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_academy::Migration),
            Box::new(m20251101_000002_subscription_plan::Migration),
            Box::new(m20251101_000003_subscription::Migration),
            Box::new(m20251101_000004_player::Migration),
            Box::new(m20251101_000005_document::Migration),
            Box::new(m20251101_000006_payment::Migration),
            Box::new(m20251101_000007_admin::Migration),
            Box::new(m20251101_000008_activity::Migration),
            Box::new(m20251101_000009_system_setting::Migration),
        ]
    }
}
