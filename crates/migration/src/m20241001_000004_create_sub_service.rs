//! Create `sub_service` table: the admin-curated catalog workers pick from.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubService::Table)
                    .if_not_exists()
                    .col(uuid(SubService::Id).primary_key())
                    .col(string_len(SubService::Name, 60).not_null())
                    .col(string_len(SubService::Category, 40).not_null())
                    .col(double(SubService::Price).not_null())
                    .col(timestamp_with_time_zone(SubService::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(SubService::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SubService::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SubService { Table, Id, Name, Category, Price, CreatedAt, UpdatedAt }
