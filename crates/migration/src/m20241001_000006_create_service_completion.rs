//! Create `service_completion` table: completion evidence for a request.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceCompletion::Table)
                    .if_not_exists()
                    .col(uuid(ServiceCompletion::Id).primary_key())
                    .col(uuid(ServiceCompletion::ServiceRequestId).not_null())
                    .col(string_len(ServiceCompletion::CompletionStatus, 16).default("pending").not_null())
                    .col(string_len(ServiceCompletion::CompletionPhoto, 1024).not_null())
                    .col(timestamp_with_time_zone(ServiceCompletion::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(ServiceCompletion::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_completion_request")
                            .from(ServiceCompletion::Table, ServiceCompletion::ServiceRequestId)
                            .to(ServiceRequest::Table, ServiceRequest::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceCompletion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceCompletion {
    Table,
    Id,
    ServiceRequestId,
    CompletionStatus,
    CompletionPhoto,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ServiceRequest { Table, Id }
