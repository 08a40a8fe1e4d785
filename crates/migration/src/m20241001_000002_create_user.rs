//! Create `user` table for customers.
//!
//! Customers sign up through the customer-facing app; the worker portal reads
//! username and email when notifying them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_len(User::Username, 64).unique_key().not_null())
                    .col(string_len(User::Email, 255).unique_key().not_null())
                    .col(string_len(User::PasswordHash, 255).not_null())
                    .col(string_len(User::Area, 128).not_null())
                    .col(boolean(User::IsVerified).default(false).not_null())
                    .col(json_binary(User::InterestedCategories).not_null())
                    .col(big_integer(User::WalletCoins).default(0).not_null())
                    .col(ColumnDef::new(User::ReferralCode).string_len(32).null())
                    .col(timestamp_with_time_zone(User::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(User::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Area,
    IsVerified,
    InterestedCategories,
    WalletCoins,
    ReferralCode,
    CreatedAt,
    UpdatedAt,
}
