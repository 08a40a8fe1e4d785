use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Service: listings per worker, and category lookups for notifications
        manager
            .create_index(
                Index::create()
                    .name("idx_service_worker")
                    .table(Service::Table)
                    .col(Service::WorkerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_service_category")
                    .table(Service::Table)
                    .col(Service::Category)
                    .to_owned(),
            )
            .await?;

        // ServiceRequest: pending-by-category feed and per-provider schedule
        manager
            .create_index(
                Index::create()
                    .name("idx_request_status_category")
                    .table(ServiceRequest::Table)
                    .col(ServiceRequest::Status)
                    .col(ServiceRequest::Category)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_request_provider")
                    .table(ServiceRequest::Table)
                    .col(ServiceRequest::ServiceProviderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_completion_request")
                    .table(ServiceCompletion::Table)
                    .col(ServiceCompletion::ServiceRequestId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_worker").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_category").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_request_status_category").table(ServiceRequest::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_request_provider").table(ServiceRequest::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_completion_request").table(ServiceCompletion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Service { Table, WorkerId, Category }

#[derive(DeriveIden)]
enum ServiceRequest { Table, Status, Category, ServiceProviderId }

#[derive(DeriveIden)]
enum ServiceCompletion { Table, ServiceRequestId }
