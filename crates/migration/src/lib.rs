//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20241001_000001_create_worker;
mod m20241001_000002_create_user;
mod m20241001_000003_create_service;
mod m20241001_000004_create_sub_service;
mod m20241001_000005_create_service_request;
mod m20241001_000006_create_service_completion;
mod m20241001_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241001_000001_create_worker::Migration),
            Box::new(m20241001_000002_create_user::Migration),
            Box::new(m20241001_000003_create_service::Migration),
            Box::new(m20241001_000004_create_sub_service::Migration),
            Box::new(m20241001_000005_create_service_request::Migration),
            Box::new(m20241001_000006_create_service_completion::Migration),
            // Indexes should always be applied last
            Box::new(m20241001_000007_add_indexes::Migration),
        ]
    }
}
