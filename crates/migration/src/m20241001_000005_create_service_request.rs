//! Create `service_request` table with FKs to `user` and (optionally) `worker`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceRequest::Table)
                    .if_not_exists()
                    .col(uuid(ServiceRequest::Id).primary_key())
                    .col(uuid(ServiceRequest::UserId).not_null())
                    .col(string_len(ServiceRequest::Category, 64).not_null())
                    .col(timestamp_with_time_zone(ServiceRequest::DateTime).not_null())
                    .col(string_len(ServiceRequest::Duration, 64).not_null())
                    .col(string_len(ServiceRequest::Status, 16).default("pending").not_null())
                    .col(ColumnDef::new(ServiceRequest::ServiceProviderId).uuid().null())
                    .col(timestamp_with_time_zone(ServiceRequest::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ServiceRequest::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_request_user")
                            .from(ServiceRequest::Table, ServiceRequest::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_request_provider")
                            .from(ServiceRequest::Table, ServiceRequest::ServiceProviderId)
                            .to(Worker::Table, Worker::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceRequest::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceRequest {
    Table,
    Id,
    UserId,
    Category,
    DateTime,
    Duration,
    Status,
    ServiceProviderId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Worker { Table, Id }
