//! Create `service` table with FK to `worker`.
//!
//! A worker's listed offering; hidden from customers until an admin approves it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(uuid(Service::WorkerId).not_null())
                    .col(string_len(Service::Title, 128).not_null())
                    .col(string_len(Service::Category, 64).not_null())
                    .col(string_len(Service::Place, 64).not_null())
                    .col(text(Service::Description).not_null())
                    .col(json_binary(Service::Images).not_null())
                    .col(double(Service::Price).not_null())
                    .col(string_len(Service::Duration, 64).not_null())
                    .col(boolean(Service::IsApproved).default(false).not_null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_worker")
                            .from(Service::Table, Service::WorkerId)
                            .to(Worker::Table, Worker::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    Id,
    WorkerId,
    Title,
    Category,
    Place,
    Description,
    Images,
    Price,
    Duration,
    IsApproved,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Worker { Table, Id }
