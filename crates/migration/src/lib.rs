pub use sea_orm_migration::prelude::*;

mod m20260815_000001_users;
mod m20260815_000002_content_tables;
mod m20260820_000003_activities;
mod m20260822_000004_subscription_tables;
mod m20260825_000005_validation_hashes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_users::Migration),
            Box::new(m20260815_000002_content_tables::Migration),
            Box::new(m20260820_000003_activities::Migration),
            Box::new(m20260822_000004_subscription_tables::Migration),
            Box::new(m20260825_000005_validation_hashes::Migration),
        ]
    }
}
