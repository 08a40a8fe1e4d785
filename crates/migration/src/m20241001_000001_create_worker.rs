//! Create `worker` table.
//!
//! Holds portal accounts: credentials, pending OTP, verification and approval flags.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Worker::Table)
                    .if_not_exists()
                    .col(uuid(Worker::Id).primary_key())
                    .col(string_len(Worker::FullName, 128).not_null())
                    .col(string_len(Worker::Email, 255).unique_key().not_null())
                    .col(string_len(Worker::MobileNumber, 32).not_null())
                    .col(string_len(Worker::PasswordHash, 255).not_null())
                    .col(ColumnDef::new(Worker::Otp).string_len(16).null())
                    .col(
                        ColumnDef::new(Worker::OtpExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(boolean(Worker::IsVerified).default(false).not_null())
                    .col(boolean(Worker::IsApproved).default(false).not_null())
                    .col(string_len(Worker::Image, 512).not_null())
                    .col(timestamp_with_time_zone(Worker::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Worker::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Worker::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Worker {
    Table,
    Id,
    FullName,
    Email,
    MobileNumber,
    PasswordHash,
    Otp,
    OtpExpiresAt,
    IsVerified,
    IsApproved,
    Image,
    CreatedAt,
    UpdatedAt,
}
